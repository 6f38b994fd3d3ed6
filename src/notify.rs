//! User-facing notifications ("toasts").
//!
//! Fire-and-forget: a notifier never fails and never blocks the caller on I/O.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes every notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(text = message, "Notify success");
    }

    fn error(&self, message: &str) {
        warn!(text = message, "Notify error");
    }
}

/// Keeps notifications in memory so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages only, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }

    fn push(&self, kind: NotificationKind, message: &str) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                kind,
                message: message.to_string(),
            });
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NotificationKind::Error, message);
    }
}
