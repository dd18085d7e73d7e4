//! The Mermaid document being previewed, plus the per-document attributes embedded in
//! Mermaid comments:
//!
//! ```text
//! %% @backgroundColor{#1e1e1e}
//! %% @config{./mermaid.json}
//! %% @outputScale{2}
//! ```

use regex::Regex;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub background_color: Option<String>,
    /// Mermaid config path, relative to the document's directory.
    pub path_to_config: Option<String>,
    /// Kept as written; see [`crate::generator::is_positive_number_str`].
    pub output_scale: Option<String>,
}

fn attribute_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"%%\s*@(backgroundColor|config|outputScale)\s*\{([^}\n]*)\}")
            .expect("valid regex")
    })
}

impl DocumentAttributes {
    /// Extracts the first occurrence of each attribute. Blank values count as absent.
    pub fn parse(code: &str) -> Self {
        let mut attrs = Self::default();
        for caps in attribute_regex().captures_iter(code) {
            let value = caps[2].trim();
            if value.is_empty() {
                continue;
            }
            let slot = match &caps[1] {
                "backgroundColor" => &mut attrs.background_color,
                "config" => &mut attrs.path_to_config,
                "outputScale" => &mut attrs.output_scale,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        attrs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidDocument {
    /// Source text, trimmed.
    pub code: String,
    pub file_name: PathBuf,
    pub current_dir: PathBuf,
    pub attributes: DocumentAttributes,
}

impl MermaidDocument {
    pub fn new(file_name: impl Into<PathBuf>, text: &str) -> Self {
        let file_name = file_name.into();
        let current_dir = match file_name.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let code = text.trim().to_string();
        let attributes = DocumentAttributes::parse(&code);
        Self {
            code,
            file_name,
            current_dir,
            attributes,
        }
    }

    pub fn file_stem(&self) -> &str {
        self.file_name
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("out")
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }
}
