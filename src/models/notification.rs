//! Transient messages shown to the resident after an action.

use crate::error::SubmissionError;
use serde::Serialize;
use std::time::Duration;

/// How long a notification stays up unless dismissed.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Message shown after a contact is saved.
pub const SUCCESS_MESSAGE: &str = "Contact added successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip)]
    pub ttl: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            ttl,
        }
    }

    /// Error notification carrying the failure's user-facing message.
    pub fn error(err: &SubmissionError, ttl: Duration) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: err.to_string(),
            ttl,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// Whether the notification should already have been dismissed.
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.ttl
    }
}
