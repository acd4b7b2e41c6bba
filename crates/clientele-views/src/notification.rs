//! The single-slot, self-dismissing notification shown by the list view.

use std::time::{Duration, Instant};

/// How long a notification stays up unless closed earlier.
pub const AUTO_HIDE: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }
}

/// Holds at most one notification; showing a new one replaces it.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) {
        self.current = Some(Notification {
            severity,
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(Severity::Error, message);
    }

    /// The notification still on screen now.
    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    /// The notification on screen at `now`, if it has not auto-hidden.
    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < AUTO_HIDE)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
