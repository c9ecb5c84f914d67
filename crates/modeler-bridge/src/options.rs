//! Per-panel configuration handed to the embedded editor.
//!
//! Every knob is optional. A `None` is never sent over the wire, so the
//! editor falls back to its own default for it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<u32>,
}

impl SizeBounds {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.initial.is_none()
    }

    /// Clamp `width` into `[min, max]` where those bounds are set.
    pub fn clamp(&self, width: u32) -> u32 {
        let width = self.min.map_or(width, |min| width.max(min));
        self.max.map_or(width, |max| width.min(max))
    }
}

/// Options for the raw XML view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XmlTabOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Passed through untouched to the XML text editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monaco_options: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesPanelOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_templates: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "SizeBounds::is_empty")]
    pub size: SizeBounds,
}

/// Options for the diagram canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "SizeBounds::is_empty")]
    pub size: SizeBounds,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelerTabOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpmn_js_options: Option<Value>,
    #[serde(default)]
    pub canvas: CanvasOptions,
    #[serde(default)]
    pub properties_panel: PropertiesPanelOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    #[serde(default)]
    pub xml_tab: XmlTabOptions,
    #[serde(default)]
    pub modeler_tab: ModelerTabOptions,
}

impl EditorOptions {
    /// Use a remembered properties panel width as the initial size, unless
    /// an initial size is configured explicitly.
    pub fn with_panel_width(mut self, width: Option<u32>) -> Self {
        let size = &mut self.modeler_tab.properties_panel.size;
        if let (Some(width), None) = (width, size.initial) {
            size.initial = Some(size.clamp(width));
        }
        self
    }
}

/// Single-entry cache: hands back the same `Arc` for as long as the key
/// compares equal, so the editor sees a stable identity between refreshes.
pub struct Memo<K, V> {
    entry: Option<(K, Arc<V>)>,
    builds: usize,
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entry: None,
            builds: 0,
        }
    }

    pub fn get_or_build<F>(&mut self, key: &K, build: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some((cached_key, value)) = &self.entry {
            if cached_key == key {
                return value.clone();
            }
        }

        let value = Arc::new(build(key));
        self.builds += 1;
        self.entry = Some((key.clone(), value.clone()));
        value
    }

    pub fn current(&self) -> Option<Arc<V>> {
        self.entry.as_ref().map(|(_, value)| value.clone())
    }

    /// How many times a value has been built.
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl<K: PartialEq + Clone, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
