use thiserror::Error;

use crate::events::{EventKind, Notification, NotificationLevel};

/// Everything that can go wrong between the host and the embedded editor.
///
/// None of these are fatal: the host recovers from each one locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("Editor handle unavailable: no live editor is mounted")]
    HandleUnavailable,

    #[error("Unrecognized event kind (source: {origin:?}, event: {event:?})")]
    UnrecognizedEventKind {
        origin: Option<String>,
        event: Option<String>,
    },

    #[error("{level}: {message}")]
    UserNotification {
        level: NotificationLevel,
        message: String,
    },

    #[error("Malformed {kind} event: {reason}")]
    MalformedEvent { kind: EventKind, reason: String },

    #[error("Editor transport error: {0}")]
    Transport(String),

    #[error("Editor returned error {code}: {message}")]
    Editor { code: i64, message: String },
}

impl BridgeError {
    /// Errors the user should see, as opposed to diagnostics for the log.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BridgeError::UserNotification { .. } | BridgeError::HandleUnavailable
        )
    }
}

impl From<Notification> for BridgeError {
    fn from(notification: Notification) -> Self {
        BridgeError::UserNotification {
            level: notification.level,
            message: notification.message,
        }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Transport(err.to_string())
    }
}
