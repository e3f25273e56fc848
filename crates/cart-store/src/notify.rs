//! User-facing notifications.

use std::sync::Mutex;

use tracing::{info, warn};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Receives success and error messages from the cart store.
///
/// Implementations must not block; the store calls them inline.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that writes notifications to the `cart::notify` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => info!(target: "cart::notify", "{}", notification.message),
            Level::Error => warn!(target: "cart::notify", "{}", notification.message),
        }
    }
}

/// Sink that keeps every notification until drained.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        let mut received = self.received.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *received)
    }

    /// Copy of everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_take_drains() {
        let sink = RecordingNotifier::new();
        sink.notify(Notification::success("ok"));
        sink.notify(Notification::error("bad"));

        assert_eq!(sink.received().len(), 2);
        assert_eq!(
            sink.take(),
            vec![Notification::success("ok"), Notification::error("bad")]
        );
        assert!(sink.take().is_empty());
    }
}
