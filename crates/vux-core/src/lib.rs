#![forbid(unsafe_code)]

//! Mermaid source annotation for the vux preview (headless).
//!
//! Before a diagram reaches the preview webview its source is extended with:
//! - `linkStyle` directives coloring links that share a `name:cohort:group` label tag
//! - a highlight class on every node that has no matching scene in the project
//! - a `click` binding on every node
//!
//! Parsing and styling are pure functions of the source text. The only I/O is scene lookup,
//! which goes through the [`SceneLookup`] trait.

pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod lines;
pub mod links;
pub mod palette;
pub mod preview;
pub mod scenes;

pub use config::Settings;
pub use document::{DocumentAttributes, MermaidDocument};
pub use error::{Error, Result};
pub use generator::{ExportPlan, ImageFormat};
pub use lines::{Edge, parse_line, split_lines};
pub use links::{LinkGroups, LinkTag, aggregate_links, parse_link_tag, style_links};
pub use palette::LINK_PALETTE;
pub use preview::RenderParams;
pub use scenes::{SceneIndex, SceneLayout, SceneLookup, WalkSceneLookup, style_scenes};

use std::path::{Path, PathBuf};

/// Appends the link styles and scene styles for `text` to `text` itself.
///
/// The two blocks are not reconciled with each other; when both style the same element the
/// renderer decides which one sticks.
pub fn annotate(text: &str, lookup: &dyn SceneLookup) -> Result<String> {
    let links = style_links(text)?;
    let scenes = style_scenes(text, lookup);
    Ok(format!("{text}\n{links}\n{scenes}\n"))
}

/// How an [`Annotator`] answers scene lookups during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Traverse the scenes tree once per distinct node name.
    Walk,
    /// Traverse once per pass and answer every name from that snapshot.
    #[default]
    Indexed,
}

#[derive(Debug, Clone)]
pub struct Annotator {
    workspace_root: PathBuf,
    layout: SceneLayout,
    strategy: LookupStrategy,
}

impl Annotator {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            layout: SceneLayout::default(),
            strategy: LookupStrategy::default(),
        }
    }

    /// Takes the scene layout from `settings`.
    pub fn from_settings(workspace_root: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self::new(workspace_root).with_layout(settings.scene_layout())
    }

    pub fn with_layout(mut self, layout: SceneLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_lookup_strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn lookup_strategy(&self) -> LookupStrategy {
        self.strategy
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn scenes_root(&self) -> PathBuf {
        self.layout.scenes_root(&self.workspace_root)
    }

    /// A fresh lookup for one pass. Nothing is shared between passes, so edits to the scenes
    /// tree show up on the next call.
    fn pass_lookup(&self) -> Box<dyn SceneLookup> {
        match self.strategy {
            LookupStrategy::Walk => Box::new(WalkSceneLookup::new(
                &self.workspace_root,
                self.layout.clone(),
            )),
            LookupStrategy::Indexed => {
                Box::new(SceneIndex::scan(&self.workspace_root, self.layout.clone()))
            }
        }
    }

    /// Synchronous variant of [`Annotator::annotate`].
    pub fn annotate_sync(&self, text: &str) -> Result<String> {
        annotate(text, &*self.pass_lookup())
    }

    /// Annotates `text` for the preview. See [`annotate`].
    ///
    /// Scene lookup blocks on the filesystem; callers on an async executor that cannot afford
    /// that should run this on a blocking pool.
    pub async fn annotate(&self, text: &str) -> Result<String> {
        self.annotate_sync(text)
    }

    pub fn style_scenes(&self, text: &str) -> String {
        style_scenes(text, &*self.pass_lookup())
    }

    /// Scene file backing the node `name`, e.g. to open it when the node is clicked.
    pub fn resolve_scene(&self, name: &str) -> Option<PathBuf> {
        WalkSceneLookup::new(&self.workspace_root, self.layout.clone()).find_scene(name)
    }

    /// Everything the preview needs to render `doc`.
    pub fn render_params(&self, doc: &MermaidDocument, settings: &Settings) -> Result<RenderParams> {
        let code = self.annotate_sync(&doc.code)?;
        let config_path = preview::mermaid_config_path(doc, settings);
        Ok(RenderParams {
            code,
            background_color: preview::background_color(doc, settings),
            mermaid_config: preview::load_mermaid_config(config_path.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests;
