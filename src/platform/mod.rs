//! Device contact picker seam.
//!
//! Not every platform can pick a contact from the address book. The
//! capability is probed once and handed to the submission settings, so the
//! rest of the crate never asks the platform directly.

mod json_file;

pub use json_file::JsonFileContactSource;

use crate::models::ExternalContactPayload;
use async_trait::async_trait;

/// Fields requested from the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Phone,
}

/// What the picker handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum PickResult {
    Selected(ExternalContactPayload),
    /// The resident closed the picker without choosing anyone
    Cancelled,
    /// The picker could not be shown
    Unavailable,
}

/// Whether contact import can be offered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportCapability {
    Available,
    #[default]
    Unavailable,
}

impl ImportCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// A platform service able to pick one contact from the device.
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Cheap check that the picker exists on this platform.
    fn is_available(&self) -> bool;

    /// Ask the resident to pick one contact.
    async fn select_one(&self, fields: &[ContactField]) -> PickResult;
}

/// Probe a source once; `None` means no source was configured.
pub fn probe(source: Option<&dyn ContactSource>) -> ImportCapability {
    match source {
        Some(source) if source.is_available() => ImportCapability::Available,
        _ => ImportCapability::Unavailable,
    }
}
