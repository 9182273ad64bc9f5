use super::{ContactField, ContactSource, PickResult};
use crate::models::ExternalContactPayload;
use async_trait::async_trait;
use std::path::PathBuf;

/// Contact source reading one picked contact from a JSON file.
///
/// Used by the command line in place of a device picker: a missing file
/// means no picker, an empty file or `null` means the pick was cancelled.
#[derive(Debug, Clone)]
pub struct JsonFileContactSource {
    path: PathBuf,
}

impl JsonFileContactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContactSource for JsonFileContactSource {
    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    async fn select_one(&self, fields: &[ContactField]) -> PickResult {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Cannot read contact file {}: {}", self.path.display(), e);
                return PickResult::Unavailable;
            }
        };

        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return PickResult::Cancelled;
        }

        let mut payload: ExternalContactPayload = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Contact file {} is not a contact: {}", self.path.display(), e);
                return PickResult::Unavailable;
            }
        };

        // Only hand over what was asked for
        if !fields.contains(&ContactField::Name) {
            payload.name = None;
        }
        if !fields.contains(&ContactField::Phone) {
            payload.phone = None;
        }

        PickResult::Selected(payload)
    }
}
