//! Contact records handed over by a device contact picker.
//!
//! Pickers disagree on shape: a name may arrive as one string or a list of
//! strings, a phone as a string, a list of strings, or a list of
//! `{ value: .. }` records. Each shape is a variant here, and all of the
//! guessing about external formats stays in this module.

use crate::error::SubmissionError;
use serde::Deserialize;
use serde_json::Value;

/// The name field of a picked contact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NameField {
    Scalar(String),
    Sequence(Vec<String>),
    /// Anything else the picker sent
    Other(Value),
}

/// The phone field of a picked contact, or one element of a phone list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PhoneField {
    Scalar(String),
    Sequence(Vec<PhoneField>),
    Record(PhoneRecord),
    Other(Value),
}

/// A labelled phone entry such as `{ "type": "mobile", "value": "98765 43210" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhoneRecord {
    #[serde(default, alias = "number", alias = "phone")]
    pub value: Option<String>,

    #[serde(default, alias = "type")]
    pub label: Option<String>,
}

/// An untrusted contact as delivered by the platform picker.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExternalContactPayload {
    #[serde(default)]
    pub name: Option<NameField>,

    #[serde(default, alias = "tel")]
    pub phone: Option<PhoneField>,
}

/// Name and phone pulled out of a picked contact.
///
/// The phone is only cleaned of spaces and hyphens; digit count and prefix
/// are checked later, at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedContact {
    pub name: String,
    pub phone: String,
}

impl ExternalContactPayload {
    /// Consume the payload and extract a name and phone candidate.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::NoPhoneAvailable` when no phone string can be
    /// found. A missing name is never an error.
    pub fn normalize(self) -> Result<ImportedContact, SubmissionError> {
        let name = self.name.map(resolve_name).unwrap_or_default();
        let phone = self
            .phone
            .and_then(resolve_phone)
            .ok_or(SubmissionError::NoPhoneAvailable)?;

        Ok(ImportedContact { name, phone })
    }
}

fn resolve_name(field: NameField) -> String {
    match field {
        NameField::Scalar(name) => name,
        NameField::Sequence(names) => names.into_iter().next().unwrap_or_default(),
        NameField::Other(_) => String::new(),
    }
}

/// Top level: a string, or the first element of a non-empty list.
fn resolve_phone(field: PhoneField) -> Option<String> {
    match field {
        PhoneField::Scalar(phone) => Some(strip_separators(&phone)),
        PhoneField::Sequence(items) => items.into_iter().next().and_then(resolve_element),
        PhoneField::Record(_) | PhoneField::Other(_) => None,
    }
}

/// Inside a list an element may also be a labelled record.
fn resolve_element(field: PhoneField) -> Option<String> {
    match field {
        PhoneField::Record(record) => record.value.map(|v| strip_separators(&v)),
        other => resolve_phone(other),
    }
}

fn strip_separators(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}
