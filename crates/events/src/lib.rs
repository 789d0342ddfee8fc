//! Domain events and transient user-facing notifications.

pub mod event;
pub mod notification;

pub use event::Event;
pub use notification::{Notification, NotificationLevel, NotificationSink, ToastBuffer};
