//! Image export planning: format, scale and destination for a captured preview.
//!
//! The capture itself happens in the webview and the write is done by the host; this module
//! only decides what to ask for and where the result goes.

use crate::config::{
    GENERATE_OUTPUT_PATH, GENERATE_QUALITY, GENERATE_SCALE, GENERATE_TYPE,
    GENERATE_USE_CURRENT_PATH, Settings,
};
use crate::document::MermaidDocument;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_IMAGE_SCALE: f64 = 1.0;
pub const DEFAULT_IMAGE_QUALITY: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
    Jpg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            _ => Err(()),
        }
    }
}

/// Non-empty, numeric and strictly positive.
pub fn is_positive_number_str(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    s.parse::<f64>().is_ok_and(|v| v.is_finite() && v > 0.0)
}

pub fn image_format(settings: &Settings) -> ImageFormat {
    settings
        .get_str(GENERATE_TYPE)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Configured scale (when positive), overridden by the document's `@outputScale`.
pub fn export_scale(settings: &Settings, doc: &MermaidDocument) -> f64 {
    if let Some(raw) = doc.attributes.output_scale.as_deref() {
        if is_positive_number_str(raw) {
            if let Ok(v) = raw.trim().parse::<f64>() {
                return v;
            }
        }
    }
    settings
        .get_f64(GENERATE_SCALE)
        .filter(|v| *v > 0.0)
        .unwrap_or(DEFAULT_IMAGE_SCALE)
}

/// The configured quality, handed to the exporter as-is. Only a missing or non-numeric
/// setting falls back to the default.
pub fn export_quality(settings: &Settings) -> f64 {
    settings
        .get_f64(GENERATE_QUALITY)
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_IMAGE_QUALITY)
}

/// Directory the exported image goes to.
///
/// `useCurrentPath` (or no configured `outputPath`, or no workspace folder) means the
/// document's own directory; otherwise `outputPath` is resolved against the workspace folder.
pub fn output_directory(
    settings: &Settings,
    workspace_folder: Option<&Path>,
    doc: &MermaidDocument,
) -> PathBuf {
    if settings.get_bool(GENERATE_USE_CURRENT_PATH).unwrap_or(false) {
        return doc.current_dir().to_path_buf();
    }
    match (
        workspace_folder,
        settings.get_non_empty_str(GENERATE_OUTPUT_PATH),
    ) {
        (Some(folder), Some(out)) => folder.join(out.trim_start_matches(['/', '\\'])),
        _ => doc.current_dir().to_path_buf(),
    }
}

pub fn output_file_path(dir: &Path, doc: &MermaidDocument, format: ImageFormat) -> PathBuf {
    dir.join(format!("{}.{}", doc.file_stem(), format.extension()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPlan {
    pub format: ImageFormat,
    pub scale: f64,
    pub quality: f64,
    pub path: PathBuf,
}

impl ExportPlan {
    pub fn resolve(
        settings: &Settings,
        workspace_folder: Option<&Path>,
        doc: &MermaidDocument,
    ) -> Self {
        let format = image_format(settings);
        let dir = output_directory(settings, workspace_folder, doc);
        Self {
            format,
            scale: export_scale(settings, doc),
            quality: export_quality(settings),
            path: output_file_path(&dir, doc, format),
        }
    }
}
