//! Extension settings.
//!
//! Settings are kept as raw JSON and read through dotted paths. Both the flat form used by
//! editor settings files (`{"vux-editor.preview.backgroundColor": "black"}`) and the nested
//! form (`{"vux-editor": {"preview": {"backgroundColor": "black"}}}`) are accepted; the flat
//! key wins when both are present.

use crate::scenes::SceneLayout;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const PREVIEW_BACKGROUND_COLOR: &str = "vux-editor.preview.backgroundColor";
pub const PREVIEW_DEFAULT_MERMAID_CONFIG: &str = "vux-editor.preview.defaultMermaidConfig";

pub const GENERATE_TYPE: &str = "vux-editor.generate.type";
pub const GENERATE_SCALE: &str = "vux-editor.generate.scale";
pub const GENERATE_QUALITY: &str = "vux-editor.generate.quality";
pub const GENERATE_OUTPUT_PATH: &str = "vux-editor.generate.outputPath";
pub const GENERATE_USE_CURRENT_PATH: &str = "vux-editor.generate.useCurrentPath";

pub const SCENES_ROOT: &str = "vux-editor.scenes.root";
pub const SCENES_EXTENSION: &str = "vux-editor.scenes.extension";
pub const SCENES_SUFFIX: &str = "vux-editor.scenes.suffix";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings(Value);

impl Default for Settings {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl Settings {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::Settings {
            message: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(Error::Settings {
                message: "settings must be a JSON object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let root = self.0.as_object()?;
        if let Some(flat) = root.get(dotted_path) {
            return Some(flat);
        }
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    /// Like [`Settings::get_str`], but treats an empty string as unset.
    pub fn get_non_empty_str(&self, dotted_path: &str) -> Option<&str> {
        self.get_str(dotted_path).filter(|s| !s.is_empty())
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.lookup(dotted_path)?.as_bool()
    }

    /// Numbers, or strings holding a number (editor settings sometimes store `"1.0"`).
    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        match self.lookup(dotted_path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Writes `value` at the nested `dotted_path`, creating intermediate objects. A flat key
    /// spelled the same way is removed so it cannot shadow the write.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let root = self.root_object_mut();
        root.remove(dotted_path);
        let segments = dotted_path.split('.').collect::<Vec<_>>();
        insert_nested(root, &segments, value);
    }

    /// Layers `other` on top of `self`: objects merge key by key, everything else is replaced.
    ///
    /// Both sides are brought to the nested form first, so a flat key on either side takes
    /// part in the merge instead of shadowing (or being shadowed by) its nested spelling.
    pub fn deep_merge(&mut self, other: &Settings) {
        self.expand_flat_keys();
        let mut incoming = other.clone();
        incoming.expand_flat_keys();
        merge_value(&mut self.0, incoming.0);
    }

    fn root_object_mut(&mut self) -> &mut Map<String, Value> {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        match &mut self.0 {
            Value::Object(root) => root,
            _ => unreachable!("settings root was just made an object"),
        }
    }

    /// Rewrites top-level `a.b.c` keys into nested objects. Flat values win over nested ones
    /// at the same path, as in [`Settings::get_str`].
    fn expand_flat_keys(&mut self) {
        let flat = self
            .root_object_mut()
            .iter()
            .filter(|(key, _)| key.contains('.'))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<Vec<_>>();
        for (key, value) in flat {
            self.set_value(&key, value);
        }
    }

    /// Scene layout, with unset keys falling back to [`SceneLayout::default`].
    pub fn scene_layout(&self) -> SceneLayout {
        let mut layout = SceneLayout::default();
        if let Some(root) = self.get_non_empty_str(SCENES_ROOT) {
            layout.root = PathBuf::from(root);
        }
        if let Some(ext) = self.get_str(SCENES_EXTENSION) {
            layout.extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(suffix) = self.get_str(SCENES_SUFFIX) {
            layout.suffix = suffix.to_string();
        }
        layout
    }
}

fn insert_nested(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cur = map;
    for seg in parents {
        let slot = cur
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        cur = next;
    }
    cur.insert(last.to_string(), value);
}

fn merge_value(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key, in_value);
                    }
                }
            }
        }
        (base_slot, in_value) => *base_slot = in_value,
    }
}
