//! Link cohort styling.
//!
//! Edge labels of the form `name:cohort:group` tie links together. Every link sharing a
//! cohort/group pair is stroked with the same palette color via one `linkStyle` directive.

use crate::lines::split_lines;
use crate::palette::link_color;
use crate::Result;
use indexmap::IndexMap;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTag {
    pub name: String,
    pub cohort: String,
    pub group: String,
}

impl LinkTag {
    /// Grouping key: `cohort` and `group` concatenated without a separator.
    ///
    /// Note this is ambiguous (`ab`+`c` and `a`+`bc` both give `abc`). Existing diagrams rely
    /// on the resulting grouping, so it is kept as is.
    pub fn group_key(&self) -> String {
        format!("{}{}", self.cohort, self.group)
    }
}

fn link_tag_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    // ASCII word characters only; each segment may be empty.
    RE.get_or_init(|| {
        Regex::new(r"([0-9A-Za-z_]*):([0-9A-Za-z_]*):([0-9A-Za-z_]*)").expect("valid regex")
    })
}

/// Parses the first `word:word:word` run found anywhere in `label`. Segments are not trimmed.
pub fn parse_link_tag(label: &str) -> Option<LinkTag> {
    let caps = link_tag_regex().captures(label)?;
    Some(LinkTag {
        name: caps[1].to_string(),
        cohort: caps[2].to_string(),
        group: caps[3].to_string(),
    })
}

/// Link indices grouped by [`LinkTag::group_key`], in first-seen group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGroups(IndexMap<String, Vec<usize>>);

impl LinkGroups {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn push(&mut self, key: String, link_index: usize) {
        self.0.entry(key).or_default().push(link_index);
    }
}

/// Groups the tagged links of `text`.
///
/// A link index counts parsed edges only (the n-th `-->|..|` line is link `n`), which is
/// also how Mermaid numbers links for `linkStyle`. Edges whose label carries no tag keep
/// their index but join no group.
pub fn aggregate_links(text: &str) -> LinkGroups {
    let mut groups = LinkGroups::default();
    for (link_index, edge) in split_lines(text).into_iter().flatten().enumerate() {
        let Some(tag) = parse_link_tag(&edge.link) else {
            continue;
        };
        groups.push(tag.group_key(), link_index);
    }
    groups
}

/// Renders one `linkStyle` directive per link group.
///
/// Returns an empty string when no edge carries a tag, and
/// [`crate::Error::PaletteExhausted`] when there are more groups than palette colors.
pub fn style_links(text: &str) -> Result<String> {
    let groups = aggregate_links(text);
    let mut out = String::new();
    for (group_index, (key, links)) in groups.iter().enumerate() {
        let color = link_color(group_index)?;
        tracing::debug!(group = key, color, links = links.len(), "link group colored");

        let indices = links
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!("linkStyle {indices} stroke:{color};\n "));
    }
    Ok(out)
}
