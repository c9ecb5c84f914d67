use async_trait::async_trait;
use diagram::ChangeReason;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::BridgeError;
use crate::events::{ContentSaved, ModelerEvent};
use crate::handle::{event_channel, EmbeddedEditor, EventReceiver, EventSender, SavedModel};
use crate::options::EditorOptions;

/// In-process editor stand-in.
///
/// Keeps its own copy of the diagram, so edits made through [`edit`] are
/// visible to `save` before anything has been announced on the event
/// stream, just like unsaved changes in a real editor.
///
/// [`edit`]: MemoryEditor::edit
pub struct MemoryEditor {
    name: String,
    xml: RwLock<String>,
    options: RwLock<Arc<EditorOptions>>,
    events: EventSender,
    alive: AtomicBool,
    configure_calls: AtomicUsize,
    save_delay: Option<Duration>,
}

impl MemoryEditor {
    /// Mount with an initial diagram. Emits `import.done` like the real
    /// diagram library does once the XML has been loaded.
    pub fn mount(xml: impl Into<String>, options: Arc<EditorOptions>) -> (Arc<Self>, EventReceiver) {
        Self::mount_with_delay(xml, options, None)
    }

    /// Same as [`mount`](Self::mount), but every `save` takes `delay` to answer.
    pub fn mount_with_delay(
        xml: impl Into<String>,
        options: Arc<EditorOptions>,
        delay: Option<Duration>,
    ) -> (Arc<Self>, EventReceiver) {
        let (events, receiver) = event_channel();
        let editor = Arc::new(Self {
            name: "memory".to_string(),
            xml: RwLock::new(xml.into()),
            options: RwLock::new(options),
            events,
            alive: AtomicBool::new(true),
            configure_calls: AtomicUsize::new(0),
            save_delay: delay,
        });

        editor.emit(
            ModelerEvent::InnerEvent {
                name: "import.done".to_string(),
                data: json!({"warnings": []}),
            }
            .to_record(),
        );
        (editor, receiver)
    }

    /// Change the in-memory diagram without announcing it.
    pub async fn edit(&self, xml: impl Into<String>) {
        *self.xml.write().await = xml.into();
    }

    /// Announce the current in-memory diagram as saved content.
    pub async fn commit(&self, reason: ChangeReason) {
        let xml = self.xml.read().await.clone();
        let svg = Some(render_preview(&xml));
        self.emit(ModelerEvent::ContentSaved(ContentSaved { xml, svg, reason }).to_record());
    }

    /// Push an arbitrary record onto the event stream.
    pub fn emit(&self, record: Value) {
        if !self.is_alive() {
            log::debug!("Dropping event from unmounted editor");
            return;
        }
        if self.events.send(record).is_err() {
            log::debug!("Event receiver gone, dropping event");
        }
    }

    pub fn configure_calls(&self) -> usize {
        self.configure_calls.load(Ordering::SeqCst)
    }

    pub async fn options(&self) -> Arc<EditorOptions> {
        self.options.read().await.clone()
    }
}

#[async_trait]
impl EmbeddedEditor for MemoryEditor {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn save(&self) -> Result<SavedModel, BridgeError> {
        if let Some(delay) = self.save_delay {
            tokio::time::sleep(delay).await;
        }
        if !self.is_alive() {
            return Err(BridgeError::Transport("editor unmounted".to_string()));
        }

        let xml = self.xml.read().await.clone();
        let svg = Some(render_preview(&xml));
        Ok(SavedModel { xml, svg })
    }

    async fn configure(&self, options: Arc<EditorOptions>) -> Result<(), BridgeError> {
        self.configure_calls.fetch_add(1, Ordering::SeqCst);
        *self.options.write().await = options;
        Ok(())
    }

    async fn unmount(&self) -> Result<(), BridgeError> {
        self.alive.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Minimal SVG stand-in for a rendered diagram: the summary line as text.
fn render_preview(xml: &str) -> String {
    let label = diagram::summarize(xml).label();
    let escaped = label
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="40"><text x="8" y="24">{}</text></svg>"#,
        escaped
    )
}
