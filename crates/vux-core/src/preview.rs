//! Parameters handed to the preview webview alongside the annotated source.

use crate::config::{PREVIEW_BACKGROUND_COLOR, PREVIEW_DEFAULT_MERMAID_CONFIG, Settings};
use crate::document::MermaidDocument;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BACKGROUND_COLOR: &str = "white";
pub const EMPTY_MERMAID_CONFIG: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParams {
    pub code: String,
    pub background_color: String,
    /// Mermaid config as JSON text.
    pub mermaid_config: String,
}

/// Document attribute, then the configured default, then white.
pub fn background_color(doc: &MermaidDocument, settings: &Settings) -> String {
    doc.attributes
        .background_color
        .as_deref()
        .or_else(|| settings.get_non_empty_str(PREVIEW_BACKGROUND_COLOR))
        .unwrap_or(DEFAULT_BACKGROUND_COLOR)
        .to_string()
}

/// Mermaid config file for `doc`: its `@config` attribute (relative to the document) or the
/// configured default.
pub fn mermaid_config_path(doc: &MermaidDocument, settings: &Settings) -> Option<PathBuf> {
    if let Some(rel) = doc.attributes.path_to_config.as_deref() {
        return Some(doc.current_dir().join(rel));
    }
    settings
        .get_non_empty_str(PREVIEW_DEFAULT_MERMAID_CONFIG)
        .map(PathBuf::from)
}

/// Reads a Mermaid config file. Anything unreadable or not JSON falls back to `{}`.
pub fn load_mermaid_config(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return EMPTY_MERMAID_CONFIG.to_string();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "cannot read mermaid config");
            return EMPTY_MERMAID_CONFIG.to_string();
        }
    };
    if let Err(err) = serde_json::from_str::<serde_json::Value>(&text) {
        tracing::warn!(path = %path.display(), %err, "mermaid config is not valid JSON");
        return EMPTY_MERMAID_CONFIG.to_string();
    }
    text
}
