use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the authoritative diagram text changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeReason {
    /// The user edited the model.
    #[serde(rename = "model.changed")]
    ModelChanged,
    /// The user switched between the diagram and the XML view.
    #[serde(rename = "view.changed")]
    ViewChanged,
}

impl ChangeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeReason::ModelChanged => "model.changed",
            ChangeReason::ViewChanged => "view.changed",
        }
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A serialized diagram plus its optional rendered preview.
///
/// The XML is whatever the editor last accepted; nothing here checks it
/// against the BPMN grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub xml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default)]
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(xml: impl Into<String>) -> Self {
        Self {
            xml: xml.into(),
            svg: None,
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn with_preview(xml: impl Into<String>, svg: Option<String>) -> Self {
        Self {
            svg,
            ..Self::new(xml)
        }
    }

    /// Mark this document as the given revision, timestamped now.
    pub fn stamped(mut self, revision: u64) -> Self {
        self.revision = revision;
        self.updated_at = Utc::now();
        self
    }

    pub fn has_preview(&self) -> bool {
        self.svg.is_some()
    }

    pub fn line_count(&self) -> usize {
        self.xml.lines().count()
    }

    pub fn byte_len(&self) -> usize {
        self.xml.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(String::new())
    }
}
