pub mod demo;
pub mod document;
pub mod summary;

pub use demo::DEMO_BPMN;
pub use document::{ChangeReason, Document};
pub use summary::{summarize, DiagramSummary};
