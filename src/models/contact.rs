//! Contact records at each stage of a submission.

use crate::domain::{Category, NormalizedPhone, PhoneInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A contact being filled in by a resident. Nothing here is validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,

    /// Phone exactly as typed or imported
    pub phone: String,

    pub category: Category,

    /// Specialisation, required for doctors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_type: Option<String>,

    /// Kind of work, required for maids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maid_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContactDraft {
    /// Create a draft with the three fields every contact needs.
    pub fn new(name: impl Into<String>, phone: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            category,
            ..Default::default()
        }
    }

    pub fn with_doctor_type(mut self, doctor_type: impl Into<String>) -> Self {
        self.doctor_type = Some(doctor_type.into());
        self
    }

    pub fn with_maid_type(mut self, maid_type: impl Into<String>) -> Self {
        self.maid_type = Some(maid_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The sub-type that applies to the current category, if any is set.
    pub fn sub_type(&self) -> Option<&str> {
        match self.category {
            Category::Doctor => self.doctor_type.as_deref(),
            Category::Maid => self.maid_type.as_deref(),
            _ => None,
        }
    }

    /// Live status of the phone field for inline hints.
    pub fn phone_status(&self) -> PhoneInput {
        PhoneInput::classify(&self.phone)
    }
}

/// A fully validated contact, ready to be written to the store.
///
/// The sub-type has already been merged into `description`. Fields are
/// read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalContactRecord {
    name: String,
    phone: NormalizedPhone,
    category: Category,
    description: String,
}

impl CanonicalContactRecord {
    pub fn new(
        name: impl Into<String>,
        phone: NormalizedPhone,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone,
            category,
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &NormalizedPhone {
        &self.phone
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Custom deserializer for row ids, which the table may hand back as
/// numbers or strings depending on the column type.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Treat a `null` text column the same as a missing one.
fn deserialize_nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A row read back from the contacts table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredContact {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(deserialize_with = "deserialize_nullable_text")]
    pub name: String,

    #[serde(deserialize_with = "deserialize_nullable_text")]
    pub phone: String,

    /// Category as stored; kept as text so unknown rows still list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredContact {
    /// Whether this row belongs to `category` (exact name match).
    pub fn is_in(&self, category: Category) -> bool {
        self.category.as_deref() == Some(category.as_str())
    }
}

impl From<CanonicalContactRecord> for StoredContact {
    fn from(record: CanonicalContactRecord) -> Self {
        Self {
            id: String::new(),
            name: record.name,
            phone: record.phone.into_inner(),
            category: Some(record.category.as_str().to_string()),
            description: Some(record.description),
            created_at: None,
        }
    }
}
