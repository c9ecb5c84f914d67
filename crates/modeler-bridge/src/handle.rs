use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::error::BridgeError;
use crate::options::EditorOptions;

/// What the editor returns when asked to serialize its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModel {
    pub xml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

pub type EventSender = mpsc::UnboundedSender<Value>;
pub type EventReceiver = mpsc::UnboundedReceiver<Value>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Command surface of a mounted editor instance.
#[async_trait]
pub trait EmbeddedEditor: Send + Sync {
    fn name(&self) -> &str;

    /// False once the instance has been unmounted or its transport died.
    fn is_alive(&self) -> bool;

    /// Serialize the editor's current in-memory state.
    async fn save(&self) -> Result<SavedModel, BridgeError>;

    async fn configure(&self, options: Arc<EditorOptions>) -> Result<(), BridgeError>;

    async fn unmount(&self) -> Result<(), BridgeError>;
}

/// Capability for issuing commands to whichever editor is currently mounted.
///
/// Clones share the same slot. Commands issued while nothing is bound, or
/// that lose the editor mid-flight, come back as
/// [`BridgeError::HandleUnavailable`].
#[derive(Clone, Default)]
pub struct EditorHandle {
    slot: Arc<RwLock<Option<Arc<dyn EmbeddedEditor>>>>,
}

impl EditorHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn bind(&self, editor: Arc<dyn EmbeddedEditor>) {
        log::info!("Editor '{}' mounted", editor.name());
        if let Some(previous) = self.slot.write().await.replace(editor) {
            log::warn!("Replacing still-bound editor '{}'", previous.name());
        }
    }

    pub async fn unbind(&self) -> Option<Arc<dyn EmbeddedEditor>> {
        self.slot.write().await.take()
    }

    pub async fn is_bound(&self) -> bool {
        self.live_editor().await.is_some()
    }

    async fn live_editor(&self) -> Option<Arc<dyn EmbeddedEditor>> {
        // Clone out of the slot so no lock is held across the command itself.
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|editor| editor.is_alive())
            .cloned()
    }

    /// Ask the mounted editor for its current XML and preview.
    ///
    /// The result reflects the editor's in-memory state, which may be ahead
    /// of the last content-saved event.
    pub async fn request_serialize(&self) -> Result<SavedModel, BridgeError> {
        let editor = self
            .live_editor()
            .await
            .ok_or(BridgeError::HandleUnavailable)?;

        let result = editor.save().await;
        Self::settle(editor.as_ref(), result)
    }

    pub async fn configure(&self, options: Arc<EditorOptions>) -> Result<(), BridgeError> {
        let editor = self
            .live_editor()
            .await
            .ok_or(BridgeError::HandleUnavailable)?;

        let result = editor.configure(options).await;
        Self::settle(editor.as_ref(), result)
    }

    /// Unbind and shut the editor down. A no-op when nothing is bound.
    pub async fn unmount(&self) -> Result<(), BridgeError> {
        match self.unbind().await {
            Some(editor) => {
                log::info!("Unmounting editor '{}'", editor.name());
                editor.unmount().await
            }
            None => Ok(()),
        }
    }

    fn settle<T>(
        editor: &dyn EmbeddedEditor,
        result: Result<T, BridgeError>,
    ) -> Result<T, BridgeError> {
        match result {
            Err(BridgeError::Transport(reason)) if !editor.is_alive() => {
                log::warn!(
                    "Editor '{}' went away during a command: {}",
                    editor.name(),
                    reason
                );
                Err(BridgeError::HandleUnavailable)
            }
            other => other,
        }
    }
}
