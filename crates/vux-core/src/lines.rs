//! Line-level edge extraction.
//!
//! Only the `from -->|label| to` form is recognised. Everything else (headers, node
//! declarations, bare `A --> B` arrows, comments) is a non-match and yields `None`.

use regex::Regex;

/// One labelled connection parsed from a single diagram line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// The text between the pipes, trimmed.
    pub link: String,
}

fn edge_line_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    // Both `.*` groups are greedy: the last `-->|` on the line opens the label and the last
    // `|` after it closes the label.
    RE.get_or_init(|| Regex::new(r"(.*)-->\|(.*)\|(.*)").expect("valid regex"))
}

pub fn parse_line(line: &str) -> Option<Edge> {
    let caps = edge_line_regex().captures(line)?;
    Some(Edge {
        from: caps[1].trim().to_string(),
        link: caps[2].trim().to_string(),
        to: caps[3].trim().to_string(),
    })
}

/// Parses every `\n`-separated line of `text`.
///
/// The output has exactly one slot per line, so a line's position survives even when it
/// does not parse.
pub fn split_lines(text: &str) -> Vec<Option<Edge>> {
    text.split('\n').map(parse_line).collect()
}

/// The successfully parsed edges of `text`, in source order.
pub fn edges(text: &str) -> Vec<Edge> {
    split_lines(text).into_iter().flatten().collect()
}
