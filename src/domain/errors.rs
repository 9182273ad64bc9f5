//! Domain validation errors.

use std::fmt;

/// Errors that can occur while validating a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The number did not strip down to exactly ten digits.
    InvalidLength { digits: usize },

    /// Ten digits, but the leading digit is not a mobile prefix.
    InvalidPrefix { first: char },
}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { digits } => {
                write!(f, "Expected 10 digits, found {}", digits)
            }
            Self::InvalidPrefix { first } => {
                write!(f, "Mobile numbers cannot start with {}", first)
            }
        }
    }
}

impl std::error::Error for PhoneError {}

/// A category name that is not part of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}
