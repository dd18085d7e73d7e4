use super::SceneLookup;
use crate::lines::edges;
use rustc_hash::FxHashSet;

pub const HIGHLIGHT_CLASS: &str = "Red";
pub const HIGHLIGHT_CLASS_DEF: &str = "classDef Red fill:#f00,stroke:#333,stroke-width:4px;";
/// Webview-side function bound to every node via `click`.
pub const CLICK_CALLBACK: &str = "postClickNode";

/// Distinct node names (`from` then `to` of every parsed edge), first-seen order. Empty
/// names (an edge whose endpoint did not parse to a word) are skipped.
///
/// All `from` names come before any `to` name, matching how the preview has always
/// ordered them.
pub fn scene_names(text: &str) -> Vec<String> {
    let edges = edges(text);
    let mut seen = FxHashSet::default();
    edges
        .iter()
        .map(|e| e.from.as_str())
        .chain(edges.iter().map(|e| e.to.as_str()))
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Renders the highlight class definition, a `class <name> Red;` line for every node that
/// does not resolve to a scene, and a `click` line for every node.
///
/// Each distinct name is looked up exactly once per call.
pub fn style_scenes(text: &str, lookup: &dyn SceneLookup) -> String {
    let mut lines = vec![HIGHLIGHT_CLASS_DEF.to_string()];
    for name in scene_names(text) {
        if lookup.find_scene(&name).is_none() {
            lines.push(format!("class {name} {HIGHLIGHT_CLASS};"));
        }
        lines.push(format!("click {name} call {CLICK_CALLBACK}({name});"));
    }
    lines.join("\n")
}
