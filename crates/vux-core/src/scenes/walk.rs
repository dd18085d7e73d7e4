use super::{SceneLayout, SceneLookup, scan_scene_files};
use std::path::{Path, PathBuf};

/// Walks the scenes tree on every lookup.
///
/// Always reflects the tree as it is on disk, at the cost of one full traversal per call.
#[derive(Debug, Clone)]
pub struct WalkSceneLookup {
    scenes_root: PathBuf,
    layout: SceneLayout,
}

impl WalkSceneLookup {
    pub fn new(workspace_root: impl AsRef<Path>, layout: SceneLayout) -> Self {
        Self {
            scenes_root: layout.scenes_root(workspace_root.as_ref()),
            layout,
        }
    }

    pub fn scenes_root(&self) -> &Path {
        &self.scenes_root
    }
}

impl SceneLookup for WalkSceneLookup {
    fn find_scene(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let files = scan_scene_files(&self.scenes_root);
        let found = self
            .layout
            .select(name, files.iter().map(PathBuf::as_path))
            .map(|rel| self.scenes_root.join(rel));
        tracing::debug!(name, found = found.is_some(), "scene lookup (walk)");
        found
    }
}
