use crate::{Error, Result};

/// Named stroke colors handed out to link groups in first-seen order.
///
/// Named colors only: the webview's Mermaid build rejects hex values in `linkStyle`.
pub const LINK_PALETTE: [&str; 29] = [
    "orange",
    "red",
    "green",
    "blue",
    "purple",
    "yellow",
    "pink",
    "brown",
    "black",
    "white",
    "gray",
    "cyan",
    "magenta",
    "lime",
    "maroon",
    "navy",
    "olive",
    "teal",
    "aqua",
    "fuchsia",
    "silver",
    "indigo",
    "violet",
    "coral",
    "crimson",
    "gold",
    "khaki",
    "lavender",
    "turquoise",
];

/// Color for the `group_index`-th distinct link group.
///
/// There is no wraparound: running past the end of the palette is an error.
pub fn link_color(group_index: usize) -> Result<&'static str> {
    LINK_PALETTE
        .get(group_index)
        .copied()
        .ok_or(Error::PaletteExhausted {
            group_index,
            palette_len: LINK_PALETTE.len(),
        })
}
