//! Society Directory - service contacts, intercom numbers and the bus
//! timetable for a residential society.
//!
//! Residents browse plumbers, doctors, maids and other helpers by category
//! and add new ones. A new contact goes through validation, a duplicate
//! check on its phone number and a single insert into the contacts table.
//!
//! # Architecture
//!
//! - **domain**: Normalized phone numbers and service categories
//! - **models**: Drafts, stored rows, picked contacts and notifications
//! - **error**: Error types for the store, config, schedule and submissions
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the Supabase contacts table
//! - **repositories**: The `ContactStore` seam the services depend on
//! - **platform**: The device contact picker seam
//! - **services**: Duplicate check, submission pipeline and category listings
//! - **directory**: Call links and society intercom numbers
//! - **schedule**: Bus timetable grouping
//! - **cache**: Time-based cache for category listings
//! - **metrics**: Request and submission counters

pub mod cache;
pub mod client;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod platform;
pub mod repositories;
pub mod schedule;
pub mod services;

pub use cache::TimedCache;
pub use client::SupabaseClient;
pub use config::Config;
pub use directory::{society_contacts, CallLinks, SocietyContact};
pub use domain::{Category, NormalizedPhone, PhoneError, PhoneInput};
pub use error::{ConfigError, ScheduleError, StoreError, SubmissionError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{
    CanonicalContactRecord, ContactDraft, ExternalContactPayload, ImportedContact, Notification,
    NotificationKind, StoredContact,
};
pub use platform::{ContactField, ContactSource, ImportCapability, PickResult};
pub use repositories::ContactStore;
pub use schedule::{bucketize, Period, ScheduleBuckets, ScheduleEntry, Timetable};
pub use services::{
    DirectoryService, DuplicateArbiter, DuplicateCheck, ImportOutcome, SideEffect,
    SubmissionOrchestrator, SubmissionSettings, SubmissionState, SubmitOutcome,
};
