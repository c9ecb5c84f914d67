//! Classification and dispatch of editor event records.
//!
//! The editor emits JSON records of the form
//! `{"source": "...", "event": "...", "data": ...}`. The `(source, event)`
//! pair is the discriminant; the payload is only looked at after the kind
//! has been decided, so a record can never match two kinds.

use diagram::{ChangeReason, Document};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::error::BridgeError;

pub const MODELER_SOURCE: &str = "modeler";
pub const BPMN_IO_SOURCE: &str = "bpmn.io";

pub const CONTENT_SAVED: &str = "content.saved";
pub const NOTIFICATION: &str = "notification";
pub const UI_UPDATE_REQUIRED: &str = "ui.update.required";
pub const PANEL_RESIZED: &str = "properties-panel.resized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ContentSaved,
    Notification,
    UiUpdateRequired,
    PanelResized,
    InnerEvent,
    Unknown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::ContentSaved => "content-saved",
            EventKind::Notification => "notification",
            EventKind::UiUpdateRequired => "ui-update-required",
            EventKind::PanelResized => "panel-resized",
            EventKind::InnerEvent => "inner",
            EventKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSaved {
    pub xml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    pub reason: ChangeReason,
}

impl ContentSaved {
    pub fn into_document(self) -> Document {
        Document::with_preview(self.xml, self.svg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Something the editor wants the user to see, e.g. an import failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelResized {
    pub width: u32,
}

/// Typed form of an editor event record.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelerEvent {
    ContentSaved(ContentSaved),
    Notification(Notification),
    UiUpdateRequired,
    PanelResized(PanelResized),
    /// A raw event forwarded from the diagram library itself.
    InnerEvent { name: String, data: Value },
    Unknown(Value),
}

impl ModelerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ModelerEvent::ContentSaved(_) => EventKind::ContentSaved,
            ModelerEvent::Notification(_) => EventKind::Notification,
            ModelerEvent::UiUpdateRequired => EventKind::UiUpdateRequired,
            ModelerEvent::PanelResized(_) => EventKind::PanelResized,
            ModelerEvent::InnerEvent { .. } => EventKind::InnerEvent,
            ModelerEvent::Unknown(_) => EventKind::Unknown,
        }
    }

    /// Encode back into the record shape the editor emits.
    pub fn to_record(&self) -> Value {
        match self {
            ModelerEvent::ContentSaved(saved) => modeler_record(CONTENT_SAVED, json!(saved)),
            ModelerEvent::Notification(n) => modeler_record(NOTIFICATION, json!(n)),
            ModelerEvent::UiUpdateRequired => modeler_record(UI_UPDATE_REQUIRED, Value::Null),
            ModelerEvent::PanelResized(resized) => modeler_record(PANEL_RESIZED, json!(resized)),
            ModelerEvent::InnerEvent { name, data } => json!({
                "source": BPMN_IO_SOURCE,
                "event": name,
                "data": data,
            }),
            ModelerEvent::Unknown(record) => record.clone(),
        }
    }
}

fn modeler_record(event: &str, data: Value) -> Value {
    json!({
        "source": MODELER_SOURCE,
        "event": event,
        "data": data,
    })
}

fn tag<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

/// Decide the kind of a record from its tags alone. Total over any JSON value.
pub fn classify(record: &Value) -> EventKind {
    match (tag(record, "source"), tag(record, "event")) {
        (Some(MODELER_SOURCE), Some(CONTENT_SAVED)) => EventKind::ContentSaved,
        (Some(MODELER_SOURCE), Some(NOTIFICATION)) => EventKind::Notification,
        (Some(MODELER_SOURCE), Some(UI_UPDATE_REQUIRED)) => EventKind::UiUpdateRequired,
        (Some(MODELER_SOURCE), Some(PANEL_RESIZED)) => EventKind::PanelResized,
        (Some(BPMN_IO_SOURCE), Some(_)) => EventKind::InnerEvent,
        _ => EventKind::Unknown,
    }
}

fn payload<T: DeserializeOwned>(kind: EventKind, record: &Value) -> Result<T, BridgeError> {
    let data = record.get("data").cloned().unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|e| BridgeError::MalformedEvent {
        kind,
        reason: e.to_string(),
    })
}

/// Classify a record and decode the payload that belongs to its kind.
pub fn decode(record: &Value) -> Result<ModelerEvent, BridgeError> {
    let kind = classify(record);
    match kind {
        EventKind::ContentSaved => payload(kind, record).map(ModelerEvent::ContentSaved),
        EventKind::Notification => payload(kind, record).map(ModelerEvent::Notification),
        EventKind::UiUpdateRequired => Ok(ModelerEvent::UiUpdateRequired),
        EventKind::PanelResized => payload(kind, record).map(ModelerEvent::PanelResized),
        EventKind::InnerEvent => Ok(ModelerEvent::InnerEvent {
            name: tag(record, "event").unwrap_or_default().to_string(),
            data: record.get("data").cloned().unwrap_or(Value::Null),
        }),
        EventKind::Unknown => Ok(ModelerEvent::Unknown(record.clone())),
    }
}

/// Receiver side of [`dispatch`].
///
/// Only `on_content_saved` is expected to change host state; every other
/// kind is observational and the defaults just log.
pub trait ModelerEventHandler {
    fn on_content_saved(&mut self, saved: ContentSaved);

    fn on_notification(&mut self, notification: Notification) {
        log::info!(
            "Editor notification ({}): {}",
            notification.level,
            notification.message
        );
    }

    fn on_ui_update_required(&mut self) {}

    fn on_panel_resized(&mut self, width: u32) {
        log::info!("Properties panel has been resized to {}", width);
    }

    fn on_inner_event(&mut self, name: &str, _data: &Value) {
        log::trace!("bpmn.io event: {}", name);
    }

    fn on_unhandled(&mut self, record: &Value, reason: &BridgeError) {
        match reason {
            BridgeError::MalformedEvent { .. } => log::warn!("{}: {}", reason, record),
            _ => log::info!("Unhandled event received: {}", record),
        }
    }
}

/// Route one record to exactly one handler method and report its kind.
///
/// Never fails: malformed payloads and unknown kinds end up in
/// `on_unhandled` and the stream carries on.
pub fn dispatch<H: ModelerEventHandler + ?Sized>(record: &Value, handler: &mut H) -> EventKind {
    let kind = classify(record);
    log::debug!("Dispatching {} event", kind);

    match decode(record) {
        Ok(ModelerEvent::ContentSaved(saved)) => handler.on_content_saved(saved),
        Ok(ModelerEvent::Notification(notification)) => handler.on_notification(notification),
        Ok(ModelerEvent::UiUpdateRequired) => handler.on_ui_update_required(),
        Ok(ModelerEvent::PanelResized(resized)) => handler.on_panel_resized(resized.width),
        Ok(ModelerEvent::InnerEvent { name, data }) => handler.on_inner_event(&name, &data),
        Ok(ModelerEvent::Unknown(record)) => {
            let reason = BridgeError::UnrecognizedEventKind {
                origin: tag(&record, "source").map(str::to_string),
                event: tag(&record, "event").map(str::to_string),
            };
            handler.on_unhandled(&record, &reason);
        }
        Err(reason) => handler.on_unhandled(record, &reason),
    }

    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        saved: Vec<ContentSaved>,
        widths: Vec<u32>,
    }

    impl ModelerEventHandler for Recorder {
        fn on_content_saved(&mut self, saved: ContentSaved) {
            self.calls.push("content-saved".to_string());
            self.saved.push(saved);
        }

        fn on_notification(&mut self, notification: Notification) {
            self.calls.push(format!("notification:{}", notification.level));
        }

        fn on_ui_update_required(&mut self) {
            self.calls.push("ui-update".to_string());
        }

        fn on_panel_resized(&mut self, width: u32) {
            self.calls.push("panel-resized".to_string());
            self.widths.push(width);
        }

        fn on_inner_event(&mut self, name: &str, _data: &Value) {
            self.calls.push(format!("inner:{}", name));
        }

        fn on_unhandled(&mut self, _record: &Value, reason: &BridgeError) {
            let label = match reason {
                BridgeError::MalformedEvent { kind, .. } => format!("malformed:{}", kind),
                BridgeError::UnrecognizedEventKind { .. } => "unrecognized".to_string(),
                other => format!("other:{}", other),
            };
            self.calls.push(label);
        }
    }

    #[test]
    fn test_classify_by_tags() {
        let cases = [
            (json!({"source": "modeler", "event": "content.saved"}), EventKind::ContentSaved),
            (json!({"source": "modeler", "event": "notification"}), EventKind::Notification),
            (json!({"source": "modeler", "event": "ui.update.required"}), EventKind::UiUpdateRequired),
            (json!({"source": "modeler", "event": "properties-panel.resized"}), EventKind::PanelResized),
            (json!({"source": "bpmn.io", "event": "element.click"}), EventKind::InnerEvent),
            (json!({"source": "modeler", "event": "something.else"}), EventKind::Unknown),
            (json!({"event": "content.saved"}), EventKind::Unknown),
            (json!("just a string"), EventKind::Unknown),
            (Value::Null, EventKind::Unknown),
        ];

        for (record, expected) in cases {
            assert_eq!(classify(&record), expected, "record: {}", record);
        }
    }

    #[test]
    fn test_tag_wins_over_payload_shape() {
        // Payload looks like a content-saved body, but the tag says resize.
        let record = json!({
            "source": "modeler",
            "event": "properties-panel.resized",
            "data": {"xml": "<x/>", "reason": "model.changed", "width": 320}
        });
        assert_eq!(classify(&record), EventKind::PanelResized);
        assert_eq!(
            decode(&record).unwrap(),
            ModelerEvent::PanelResized(PanelResized { width: 320 })
        );
    }

    #[test]
    fn test_decode_content_saved() {
        let record = json!({
            "source": "modeler",
            "event": "content.saved",
            "data": {"xml": "<d1/>", "svg": "<svg/>", "reason": "view.changed"}
        });
        match decode(&record).unwrap() {
            ModelerEvent::ContentSaved(saved) => {
                assert_eq!(saved.xml, "<d1/>");
                assert_eq!(saved.svg.as_deref(), Some("<svg/>"));
                assert_eq!(saved.reason, ChangeReason::ViewChanged);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_malformed_payload() {
        let record = json!({
            "source": "modeler",
            "event": "content.saved",
            "data": {"svg": "<svg/>"}
        });
        let err = decode(&record).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::MalformedEvent {
                kind: EventKind::ContentSaved,
                ..
            }
        ));
    }

    #[test]
    fn test_dispatch_routes_each_kind_once() {
        let mut recorder = Recorder::default();
        let records = [
            ModelerEvent::ContentSaved(ContentSaved {
                xml: "<d1/>".to_string(),
                svg: None,
                reason: ChangeReason::ModelChanged,
            })
            .to_record(),
            ModelerEvent::Notification(Notification {
                level: NotificationLevel::Error,
                message: "import failed".to_string(),
            })
            .to_record(),
            ModelerEvent::UiUpdateRequired.to_record(),
            ModelerEvent::PanelResized(PanelResized { width: 240 }).to_record(),
            ModelerEvent::InnerEvent {
                name: "selection.changed".to_string(),
                data: json!({}),
            }
            .to_record(),
            json!({"source": "elsewhere", "event": "boom"}),
            json!({"source": "modeler", "event": "properties-panel.resized", "data": {"width": "wide"}}),
        ];

        let kinds: Vec<EventKind> = records
            .iter()
            .map(|record| dispatch(record, &mut recorder))
            .collect();

        assert_eq!(
            recorder.calls,
            vec![
                "content-saved",
                "notification:error",
                "ui-update",
                "panel-resized",
                "inner:selection.changed",
                "unrecognized",
                "malformed:panel-resized",
            ]
        );
        assert_eq!(kinds[5], EventKind::Unknown);
        assert_eq!(kinds[6], EventKind::PanelResized);
        assert_eq!(recorder.saved.len(), 1);
        assert_eq!(recorder.widths, vec![240]);
    }

    #[test]
    fn test_default_handlers_only_log() {
        struct SaveOnly(usize);
        impl ModelerEventHandler for SaveOnly {
            fn on_content_saved(&mut self, _saved: ContentSaved) {
                self.0 += 1;
            }
        }

        let mut handler = SaveOnly(0);
        dispatch(&ModelerEvent::UiUpdateRequired.to_record(), &mut handler);
        dispatch(&json!({"nonsense": true}), &mut handler);
        dispatch(&ModelerEvent::PanelResized(PanelResized { width: 1 }).to_record(), &mut handler);
        assert_eq!(handler.0, 0);
    }
}
