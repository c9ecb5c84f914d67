use modeler_bridge::{BridgeError, NotificationLevel};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl From<NotificationLevel> for MessageType {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Info => MessageType::Info,
            NotificationLevel::Success => MessageType::Success,
            NotificationLevel::Warning => MessageType::Warning,
            NotificationLevel::Error => MessageType::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub content: String,
    pub message_type: MessageType,
    pub created_at: Instant,
    pub auto_clear_duration: Option<Duration>,
}

impl StatusMessage {
    pub fn new(content: String, message_type: MessageType) -> Self {
        Self {
            content,
            message_type,
            created_at: Instant::now(),
            auto_clear_duration: Self::default_duration_for_type(message_type),
        }
    }

    pub fn with_duration(content: String, message_type: MessageType, duration: Duration) -> Self {
        Self {
            auto_clear_duration: Some(duration),
            ..Self::new(content, message_type)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.auto_clear_duration
            .is_some_and(|duration| self.created_at.elapsed() > duration)
    }

    fn default_duration_for_type(message_type: MessageType) -> Option<Duration> {
        match message_type {
            MessageType::Info => Some(Duration::from_secs(3)),
            MessageType::Success => Some(Duration::from_secs(2)),
            MessageType::Warning => Some(Duration::from_secs(5)),
            // Errors from the editor stay until something replaces them.
            MessageType::Error => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusManager {
    current_message: Option<StatusMessage>,
}

impl StatusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message_type: MessageType, content: impl Into<String>) {
        self.current_message = Some(StatusMessage::new(content.into(), message_type));
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.show(MessageType::Info, message);
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.show(MessageType::Success, message);
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.show(MessageType::Warning, message);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.show(MessageType::Error, message);
    }

    /// Put a bridge error on the status line.
    ///
    /// Editor notifications keep their own level and text; everything else
    /// is shown as an error with its display form.
    pub fn surface(&mut self, error: &BridgeError) {
        if !error.is_user_facing() {
            self.set_error(error.to_string());
            return;
        }

        match error {
            BridgeError::UserNotification { level, message } => {
                self.show(MessageType::from(*level), message.clone())
            }
            _ => self.set_warning("No editor is mounted, nothing to save"),
        }
    }

    pub fn clear(&mut self) {
        self.current_message = None;
    }

    pub fn update(&mut self) {
        if self
            .current_message
            .as_ref()
            .is_some_and(StatusMessage::is_expired)
        {
            self.current_message = None;
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    pub fn has_message(&self) -> bool {
        self.current_message.is_some()
    }
}
