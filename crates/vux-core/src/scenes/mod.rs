//! Scene resolution and scene highlighting.
//!
//! A diagram node "resolves" when the project has a scene for it under the scenes root,
//! either as `<name>/index.<ext>` or as `<name><suffix>.<ext>`, at any depth. Unresolved
//! nodes are highlighted in the preview.

mod index;
mod style;
mod walk;

pub use index::SceneIndex;
pub use style::{CLICK_CALLBACK, HIGHLIGHT_CLASS, HIGHLIGHT_CLASS_DEF, scene_names, style_scenes};
pub use walk::WalkSceneLookup;

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Answers "is there a scene for this node name?".
///
/// Implementations never fail: an unreadable or missing scenes tree simply finds nothing.
pub trait SceneLookup {
    /// Path of the first matching scene file, if any.
    fn find_scene(&self, name: &str) -> Option<PathBuf>;
}

impl<T: SceneLookup + ?Sized> SceneLookup for &T {
    fn find_scene(&self, name: &str) -> Option<PathBuf> {
        (**self).find_scene(name)
    }
}

/// Where scenes live relative to the workspace root and how their files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLayout {
    /// Scenes directory, relative to the workspace root.
    pub root: PathBuf,
    /// File extension without the dot. Empty means extensionless files.
    pub extension: String,
    /// Appended to the node name for file-style scenes.
    pub suffix: String,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src").join("scenes"),
            extension: "ts".to_string(),
            suffix: "Scene".to_string(),
        }
    }
}

impl SceneLayout {
    pub fn scenes_root(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.root)
    }

    fn with_extension(&self, stem: &str) -> String {
        if self.extension.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}.{}", self.extension)
        }
    }

    /// `<name>/index.<ext>`
    pub fn index_path(&self, name: &str) -> PathBuf {
        Path::new(name).join(self.with_extension("index"))
    }

    /// `<name><suffix>.<ext>`
    pub fn scene_file_path(&self, name: &str) -> PathBuf {
        PathBuf::from(self.with_extension(&format!("{name}{}", self.suffix)))
    }

    /// Picks the scene for `name` among `candidates` (paths relative to the scenes root).
    ///
    /// Index-style matches win over file-style matches; within each style the smallest path
    /// wins so the answer does not depend on traversal order.
    pub(crate) fn select<'a>(
        &self,
        name: &str,
        candidates: impl IntoIterator<Item = &'a Path>,
    ) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let index_path = self.index_path(name);
        let file_path = self.scene_file_path(name);

        let mut index_hits: Vec<&Path> = Vec::new();
        let mut file_hits: Vec<&Path> = Vec::new();
        for rel in candidates {
            if rel.ends_with(&index_path) {
                index_hits.push(rel);
            } else if rel.ends_with(&file_path) {
                file_hits.push(rel);
            }
        }
        index_hits.sort();
        file_hits.sort();
        index_hits
            .into_iter()
            .chain(file_hits)
            .next()
            .map(Path::to_path_buf)
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}

/// Every non-directory entry under `scenes_root`, relative to it.
///
/// Hidden directories are not descended into. Unreadable entries (and a missing root) are
/// skipped rather than reported.
pub(crate) fn scan_scene_files(scenes_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(scenes_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden_dir(e))
        .filter_map(|e| e.ok())
        // A root that is itself a file is not a scenes tree.
        .filter(|e| e.depth() > 0 && !e.file_type().is_dir())
        .filter_map(|e| {
            e.path()
                .strip_prefix(scenes_root)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect()
}
