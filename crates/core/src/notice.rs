//! User-facing notices.
//!
//! Workflow actions report their outcome as short messages (the "toasts" of a graphical
//! front-end). They travel over an unbounded channel so the orchestrator never blocks on
//! whoever renders them.

use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            raised_at: Utc::now(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)
    }
}

pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Sending half of the notice channel.
///
/// A dropped receiver is not an error: notices are best-effort and the send is only logged.
#[derive(Clone, Debug)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

impl NoticeSender {
    pub fn post(&self, notice: Notice) {
        if let Err(err) = self.tx.send(notice) {
            tracing::debug!("notice dropped, no receiver: {}", err.0);
        }
    }

    pub fn info(&self, text: impl Into<String>) {
        self.post(Notice::new(NoticeLevel::Info, text));
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.post(Notice::new(NoticeLevel::Warning, text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.post(Notice::new(NoticeLevel::Error, text));
    }
}

/// Create a connected notice sender and receiver.
pub fn notice_channel() -> (NoticeSender, NoticeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}

/// Take every notice currently queued, without waiting for more.
pub fn drain(rx: &mut NoticeReceiver) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}
