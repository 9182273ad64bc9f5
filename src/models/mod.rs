//! Data models for the society directory.
//!
//! This module contains the records that flow through a contact submission,
//! from the raw draft or picked contact to the row stored in the contacts
//! table, plus the notifications shown to residents.

pub mod contact;
pub mod external;
pub mod notification;

pub use contact::{CanonicalContactRecord, ContactDraft, StoredContact};
pub use external::{ExternalContactPayload, ImportedContact, NameField, PhoneField, PhoneRecord};
pub use notification::{Notification, NotificationKind};
