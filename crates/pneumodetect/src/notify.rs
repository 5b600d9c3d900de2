//! Advisory notifications.
//!
//! Pages surface short success/info messages at fixed points (login, signup,
//! recording start, analysis complete, password reset). Delivery is
//! fire-and-forget: a dropped receiver is not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Informational progress message.
    Info,
    /// An action completed successfully.
    Success,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// A single advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity of the message.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
    /// When the notice was raised.
    pub at: DateTime<Utc>,
}

impl Notice {
    /// Create a notice stamped with the current time.
    #[must_use]
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Sending half of the notification channel.
///
/// Cheap to clone; every view-model holds its own copy.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<Notice>>,
}

impl Notifier {
    /// Create a notifier together with the receiver that observes it.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A notifier that only logs.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Raise an informational notice.
    pub fn info(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Info, message));
    }

    /// Raise a success notice.
    pub fn success(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Success, message));
    }

    /// Raise a notice.
    pub fn send(&self, notice: Notice) {
        info!(level = %notice.level, message = %notice.message, "notice");
        if let Some(tx) = &self.tx {
            // Nobody listening is fine
            let _ = tx.send(notice);
        }
    }
}

/// Drain every notice currently queued on `rx` without waiting.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}
