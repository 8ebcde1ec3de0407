// Alert feed state and the notifier capability.
// Collaborators surface user-visible alerts through an injected Notifier
// handle; the event loop drains them into the feed rendered by the Activity
// pane. There is no global alert store.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-visible alert notification.
#[derive(Debug, Clone)]
pub struct Alert {
    pub level: AlertLevel,
    /// Short headline.
    pub message: String,
    /// Longer human-readable detail.
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(AlertLevel::Info, message, description)
    }

    pub fn success(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(AlertLevel::Success, message, description)
    }

    pub fn warning(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(AlertLevel::Warning, message, description)
    }

    pub fn error(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, message, description)
    }
}

/// Clonable handle for emitting alerts from anywhere, including spawned API
/// tasks. Sends are fire-and-forget; a closed receiver drops the alert.
#[derive(Clone)]
pub struct Notifier {
    tx: UnboundedSender<Alert>,
}

impl Notifier {
    /// Create a notifier and the receiving end the event loop drains.
    pub fn channel() -> (Self, UnboundedReceiver<Alert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, level: AlertLevel, message: impl Into<String>, description: impl Into<String>) {
        let _ = self.tx.send(Alert::new(level, message, description));
    }
}

/// The alert list with scroll state and an unread-error badge counter.
#[derive(Debug)]
pub struct AlertFeed {
    alerts: Vec<Alert>,
    pub list_state: ListState,
    unread_errors: usize,
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self {
            alerts: Vec::new(),
            list_state: ListState::default(),
            unread_errors: 0,
        }
    }
}

impl AlertFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alert: Alert) {
        if alert.level == AlertLevel::Error {
            self.unread_errors += 1;
        }
        self.alerts.push(alert);
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Errors received since the feed was last viewed.
    pub fn unread_errors(&self) -> usize {
        self.unread_errors
    }

    /// Clear the unread badge (the feed became visible).
    pub fn mark_read(&mut self) {
        self.unread_errors = 0;
    }

    /// Select the previous alert in the list.
    pub fn select_prev(&mut self) {
        if self.alerts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the next alert in the list.
    pub fn select_next(&mut self) {
        if self.alerts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.alerts.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}
