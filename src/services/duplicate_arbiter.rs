//! Duplicate detection against the contact store.

use crate::domain::NormalizedPhone;
use crate::error::SubmissionError;
use crate::models::StoredContact;
use crate::repositories::ContactStore;
use std::sync::Arc;

/// Verdict of a duplicate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateCheck {
    Unique,
    /// Existing rows carrying the same number
    Duplicate(Vec<StoredContact>),
}

impl DuplicateCheck {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Decides whether a phone number is already in the directory.
#[derive(Clone)]
pub struct DuplicateArbiter {
    store: Arc<dyn ContactStore>,
}

impl DuplicateArbiter {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Look the number up in the store.
    ///
    /// # Errors
    ///
    /// A failed lookup is returned as `SubmissionError::StoreUnavailable`.
    /// It is never reported as `Unique`.
    pub async fn check(&self, phone: &NormalizedPhone) -> Result<DuplicateCheck, SubmissionError> {
        let rows = self.store.query_by_phone(phone.as_str()).await.map_err(|e| {
            tracing::error!("Duplicate check for {} failed: {}", phone, e);
            SubmissionError::StoreUnavailable(e.to_string())
        })?;

        let matches: Vec<StoredContact> = rows
            .into_iter()
            .filter(|row| row.phone == phone.as_str())
            .collect();

        if matches.is_empty() {
            Ok(DuplicateCheck::Unique)
        } else {
            tracing::debug!("{} already listed {} time(s)", phone, matches.len());
            Ok(DuplicateCheck::Duplicate(matches))
        }
    }
}
