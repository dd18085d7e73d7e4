use super::{SceneLayout, SceneLookup, scan_scene_files};
use std::path::{Path, PathBuf};

/// A snapshot of the scenes tree taken by one traversal.
///
/// Lookups are answered from memory with the same matching rules as
/// [`super::WalkSceneLookup`]. The snapshot goes stale as soon as the tree changes, so build
/// one per annotation pass rather than keeping it around.
#[derive(Debug, Clone)]
pub struct SceneIndex {
    scenes_root: PathBuf,
    layout: SceneLayout,
    files: Vec<PathBuf>,
}

impl SceneIndex {
    pub fn scan(workspace_root: impl AsRef<Path>, layout: SceneLayout) -> Self {
        let scenes_root = layout.scenes_root(workspace_root.as_ref());
        let files = scan_scene_files(&scenes_root);
        tracing::debug!(
            root = %scenes_root.display(),
            files = files.len(),
            "scene index built"
        );
        Self {
            scenes_root,
            layout,
            files,
        }
    }

    pub fn scenes_root(&self) -> &Path {
        &self.scenes_root
    }

    /// Number of files seen under the scenes root.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SceneLookup for SceneIndex {
    fn find_scene(&self, name: &str) -> Option<PathBuf> {
        self.layout
            .select(name, self.files.iter().map(PathBuf::as_path))
            .map(|rel| self.scenes_root.join(rel))
    }
}
