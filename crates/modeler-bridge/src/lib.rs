//! Bridge between a host application and an embedded BPMN editor.
//!
//! The editor is an external collaborator: it renders and edits the
//! diagram, emits a stream of loosely typed event records, and answers a
//! handful of imperative commands. This crate turns that surface into
//! typed pieces the host can compose:
//!
//! - [`DocumentStore`] holds the authoritative diagram text.
//! - [`events`] classifies raw records and dispatches them to a
//!   [`ModelerEventHandler`].
//! - [`EditorHandle`] issues commands to whichever editor is mounted.
//! - [`options`] carries the per-panel configuration and its memoization.

mod client;
mod error;
pub mod events;
mod handle;
mod memory;
pub mod options;
mod store;

pub use client::{ProcessEditor, LIFECYCLE_TIMEOUT};
pub use error::BridgeError;
pub use events::{
    classify, decode, dispatch, ContentSaved, EventKind, ModelerEvent, ModelerEventHandler,
    Notification, NotificationLevel, PanelResized,
};
pub use handle::{event_channel, EditorHandle, EmbeddedEditor, EventReceiver, EventSender, SavedModel};
pub use memory::MemoryEditor;
pub use options::{
    CanvasOptions, EditorOptions, Memo, ModelerTabOptions, PropertiesPanelOptions, SizeBounds,
    XmlTabOptions,
};
pub use store::{DocumentStore, SubscriptionId};
