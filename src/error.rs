//! Error types for the society directory.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{Category, PhoneError};
use thiserror::Error;

/// Errors that can occur when talking to the remote contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Store returned an error status code
    #[error("Store error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Table or row not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API key rejected
    #[error("Authentication failed")]
    Unauthorized,

    /// Insert violated a table constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised while reading timetable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Time string is not a valid 24-hour "H:MM" value
    #[error("Invalid schedule time: {0:?}")]
    InvalidTime(String),
}

/// Everything that can stop a contact submission or import.
///
/// The `Display` text is the message shown to the resident.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please enter the contact's {0}")]
    MissingRequiredField(&'static str),

    #[error("Please specify the {} type", .0.as_str().to_lowercase())]
    MissingSubType(Category),

    #[error("Phone number must have exactly 10 digits (found {digits})")]
    InvalidLength { digits: usize },

    #[error("Phone number must start with 6, 7, 8 or 9")]
    InvalidPrefix,

    #[error("The selected contact has no phone number")]
    NoPhoneAvailable,

    #[error("A contact with this phone number already exists")]
    DuplicateContact,

    #[error("Could not check existing contacts ({0}). Please try again.")]
    StoreUnavailable(String),

    #[error("Failed to save contact ({0}). Please try again.")]
    PersistError(String),

    #[error("Importing from device contacts is not supported on this device")]
    ImportUnavailable,

    #[error("Contact selection was cancelled")]
    ImportCancelled,
}

impl SubmissionError {
    /// Whether the failure should reach the notification channel.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::ImportCancelled)
    }

    /// Whether the draft can be fixed by the resident before resubmitting.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField(_)
                | Self::MissingSubType(_)
                | Self::InvalidLength { .. }
                | Self::InvalidPrefix
        )
    }
}

impl From<PhoneError> for SubmissionError {
    fn from(err: PhoneError) -> Self {
        match err {
            PhoneError::InvalidLength { digits } => Self::InvalidLength { digits },
            PhoneError::InvalidPrefix { .. } => Self::InvalidPrefix,
        }
    }
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ScheduleError
pub type ScheduleResult<T> = Result<T, ScheduleError>;
