//! Transient toast-style notifications.
//!
//! A notification describes the outcome of one operation. It is shown once
//! and dropped: sinks buffer notifications for the current interaction only,
//! and nothing writes them to a durable log.

use serde::Serialize;

/// Severity of an operation outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A short-lived message describing the outcome of the last operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Destination for notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// In-memory sink scoped to a single interaction.
///
/// - No IO
/// - Insertion order preserved
/// - Every notification is also emitted as a tracing event
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToastBuffer {
    toasts: Vec<Notification>,
}

impl ToastBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Notification> {
        self.toasts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Take all buffered notifications, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.toasts)
    }
}

impl NotificationSink for ToastBuffer {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(level = "success", message = %notification.message, "toast")
            }
            NotificationLevel::Warning => {
                tracing::warn!(level = "warning", message = %notification.message, "toast")
            }
            NotificationLevel::Error => {
                tracing::warn!(level = "error", message = %notification.message, "toast")
            }
        }
        self.toasts.push(notification);
    }
}
