//! NormalizedPhone value object.

use super::errors::PhoneError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of digits in a local mobile number.
pub const PHONE_DIGITS: usize = 10;

const MOBILE_PREFIXES: [char; 4] = ['6', '7', '8', '9'];

/// A validated ten-digit mobile number.
///
/// The digit string is the sole duplicate key for contacts: two numbers are
/// the same contact iff their digits are equal. The only way to obtain one
/// is through [`NormalizedPhone::parse`] (or [`PhoneInput::classify`]).
///
/// # Example
///
/// ```
/// use society_directory::domain::NormalizedPhone;
///
/// let phone = NormalizedPhone::parse("98 76-543210").unwrap();
/// assert_eq!(phone.as_str(), "9876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    /// Strip every non-digit character from `raw` and validate what remains.
    ///
    /// # Errors
    ///
    /// - `PhoneError::InvalidLength` if the stripped string is not 10 digits
    ///   long (an empty string counts as zero digits)
    /// - `PhoneError::InvalidPrefix` if it does not start with 6, 7, 8 or 9
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        match PhoneInput::classify(raw) {
            PhoneInput::Empty => Err(PhoneError::InvalidLength { digits: 0 }),
            PhoneInput::Invalid(err) => Err(err),
            PhoneInput::Valid(phone) => Ok(phone),
        }
    }

    /// Get the digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Result of checking a phone field while the resident is still typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneInput {
    /// Nothing typed yet; not an error.
    Empty,
    Invalid(PhoneError),
    Valid(NormalizedPhone),
}

impl PhoneInput {
    pub fn classify(raw: &str) -> Self {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.is_empty() {
            return Self::Empty;
        }

        if digits.len() != PHONE_DIGITS {
            return Self::Invalid(PhoneError::InvalidLength {
                digits: digits.len(),
            });
        }

        // Length check above guarantees a first char
        let first = digits.chars().next().unwrap_or('0');
        if !MOBILE_PREFIXES.contains(&first) {
            return Self::Invalid(PhoneError::InvalidPrefix { first });
        }

        Self::Valid(NormalizedPhone(digits))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

// Serde support - serialize as the digit string
impl Serialize for NormalizedPhone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize through the normalizer
impl<'de> Deserialize<'de> for NormalizedPhone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NormalizedPhone::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
