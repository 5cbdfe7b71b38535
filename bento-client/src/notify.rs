//! Advisory notices
//!
//! The notifier holds at most one ephemeral, purely informational
//! message for the UI. A new notice replaces the old one, and a notice
//! expires after a fixed TTL. Expiry is evaluated lazily on read, so no
//! background task is needed and no operation ever waits on a notice.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Notice severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One advisory message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Warning,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

struct ActiveNotice {
    notice: Notice,
    posted_at: Instant,
}

/// Single-slot advisory notice sink
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Option<ActiveNotice>>>,
    ttl: Duration,
}

impl Notifier {
    /// Create a notifier whose notices expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Post a notice, replacing any visible one
    pub fn notify(&self, notice: Notice) {
        tracing::debug!(title = %notice.title, message = %notice.message, "Advisory notice");
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(ActiveNotice {
                notice,
                posted_at: Instant::now(),
            });
        }
    }

    /// The currently visible notice, if any
    pub fn current(&self) -> Option<Notice> {
        let mut slot = self.slot.lock().ok()?;
        match slot.as_ref() {
            Some(active) if active.posted_at.elapsed() < self.ttl => Some(active.notice.clone()),
            Some(_) => {
                // Expired, drop it
                *slot = None;
                None
            }
            None => None,
        }
    }

    /// Dismiss the visible notice
    pub fn dismiss(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}
