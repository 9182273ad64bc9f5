//! Contact submission pipeline.
//!
//! A submission moves through
//! `Idle -> Validating -> CheckingDuplicate -> Persisting -> Succeeded`,
//! or drops to `Failed(reason)` at any step, and always comes back to `Idle`
//! so the resident can try again. Only one submission runs at a time; a
//! submit that arrives while another is in flight is ignored.
//!
//! The orchestrator never sleeps or navigates. After a success it returns a
//! [`SideEffect`] telling the caller to leave the form after a short delay.

use crate::config::Config;
use crate::domain::{resolve_description, NormalizedPhone};
use crate::error::SubmissionError;
use crate::metrics::Metrics;
use crate::models::notification::{DEFAULT_NOTIFICATION_TTL, SUCCESS_MESSAGE};
use crate::models::{CanonicalContactRecord, ContactDraft, ImportedContact, Notification};
use crate::platform::{ContactField, ContactSource, ImportCapability, PickResult};
use crate::repositories::ContactStore;
use crate::services::directory::DirectoryService;
use crate::services::duplicate_arbiter::{DuplicateArbiter, DuplicateCheck};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Default pause between a success message and leaving the form.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Knobs for the orchestrator, including the probed import capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub redirect_delay: Duration,
    pub notification_ttl: Duration,
    pub import_capability: ImportCapability,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            import_capability: ImportCapability::Unavailable,
        }
    }
}

impl SubmissionSettings {
    pub fn from_config(config: &Config, import_capability: ImportCapability) -> Self {
        Self {
            redirect_delay: config.success_redirect_delay(),
            notification_ttl: config.notification_ttl(),
            import_capability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    CheckingDuplicate,
    Persisting,
    Succeeded,
    Failed(SubmissionError),
}

/// Work the caller must carry out after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Leave the form once `after` has passed.
    NavigateHome { after: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded {
        record: CanonicalContactRecord,
        effect: SideEffect,
    },
    Failed(SubmissionError),
    /// Another submission was already in flight
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImportedContact),
    /// The picker was dismissed; the draft is untouched
    Cancelled,
    Failed(SubmissionError),
    /// A submission was in flight
    Ignored,
}

/// Check a draft and produce the phone number used as duplicate key.
///
/// Checks run in order: name present, phone present, required sub-type
/// present, phone valid.
pub fn validate_draft(draft: &ContactDraft) -> Result<NormalizedPhone, SubmissionError> {
    if draft.name.trim().is_empty() {
        return Err(SubmissionError::MissingRequiredField("name"));
    }

    if draft.phone.trim().is_empty() {
        return Err(SubmissionError::MissingRequiredField("phone"));
    }

    let has_sub_type = draft.sub_type().is_some_and(|s| !s.trim().is_empty());
    if draft.category.requires_sub_type() && !has_sub_type {
        return Err(SubmissionError::MissingSubType(draft.category));
    }

    Ok(NormalizedPhone::parse(&draft.phone)?)
}

/// Build the record to persist from a validated draft.
pub fn build_record(draft: &ContactDraft, phone: NormalizedPhone) -> CanonicalContactRecord {
    let description = draft.description.as_deref().map(str::trim).unwrap_or("");
    let merged = resolve_description(
        draft.category,
        draft.doctor_type.as_deref().map(str::trim),
        draft.maid_type.as_deref().map(str::trim),
        description,
    );

    CanonicalContactRecord::new(draft.name.trim(), phone, draft.category, merged)
}

struct Inner {
    state: SubmissionState,
    draft: ContactDraft,
    notification: Option<Notification>,
    /// States visited by the latest submission
    trail: Vec<SubmissionState>,
}

impl Inner {
    fn enter(&mut self, state: SubmissionState) {
        tracing::debug!("Submission state {:?} -> {:?}", self.state, state);
        self.trail.push(state.clone());
        self.state = state;
    }
}

/// Owns the draft and drives it through the submission pipeline.
pub struct SubmissionOrchestrator {
    store: Arc<dyn ContactStore>,
    arbiter: DuplicateArbiter,
    settings: SubmissionSettings,
    metrics: Metrics,
    directory: Option<DirectoryService>,
    inner: Mutex<Inner>,
}

impl SubmissionOrchestrator {
    pub fn new(store: Arc<dyn ContactStore>, settings: SubmissionSettings) -> Self {
        Self {
            arbiter: DuplicateArbiter::new(store.clone()),
            store,
            settings,
            metrics: Metrics::new(),
            directory: None,
            inner: Mutex::new(Inner {
                state: SubmissionState::Idle,
                draft: ContactDraft::default(),
                notification: None,
                trail: Vec::new(),
            }),
        }
    }

    /// Report outcomes into an existing metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Drop cached listings of a category once a contact lands in it.
    pub fn with_directory(mut self, directory: DirectoryService) -> Self {
        self.directory = Some(directory);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, state: SubmissionState) {
        self.lock().enter(state);
    }

    pub fn settings(&self) -> &SubmissionSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub fn draft(&self) -> ContactDraft {
        self.lock().draft.clone()
    }

    /// Replace the whole draft.
    pub fn set_draft(&self, draft: ContactDraft) {
        self.lock().draft = draft;
    }

    /// Edit the draft in place, e.g. one form field at a time.
    pub fn update_draft(&self, edit: impl FnOnce(&mut ContactDraft)) {
        edit(&mut self.lock().draft);
    }

    /// The message currently on screen, if any.
    pub fn notification(&self) -> Option<Notification> {
        self.lock().notification.clone()
    }

    pub fn dismiss_notification(&self) {
        self.lock().notification = None;
    }

    /// Whether the import action should be offered.
    pub fn can_import(&self) -> bool {
        self.settings.import_capability.is_available() && self.state() == SubmissionState::Idle
    }

    /// States visited by the most recent submission, in order.
    pub fn transitions(&self) -> Vec<SubmissionState> {
        self.lock().trail.clone()
    }

    /// Run one submission of the current draft.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut inner = self.lock();
            if inner.state != SubmissionState::Idle {
                tracing::debug!("Submit ignored while {:?}", inner.state);
                return SubmitOutcome::Ignored;
            }
            inner.trail.clear();
            inner.notification = None;
            inner.enter(SubmissionState::Validating);
            inner.draft.clone()
        };

        let result = AssertUnwindSafe(self.run_pipeline(draft))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!("Submission pipeline panicked");
                Err(SubmissionError::PersistError(
                    "an unexpected error occurred".to_string(),
                ))
            });

        self.finish(result)
    }

    async fn run_pipeline(
        &self,
        draft: ContactDraft,
    ) -> Result<CanonicalContactRecord, SubmissionError> {
        let phone = validate_draft(&draft)?;

        self.enter(SubmissionState::CheckingDuplicate);
        if let DuplicateCheck::Duplicate(existing) = self.arbiter.check(&phone).await? {
            tracing::debug!(
                "Rejecting {}: already stored as {:?}",
                phone,
                existing.iter().map(|c| c.id.as_str()).collect::<Vec<_>>()
            );
            return Err(SubmissionError::DuplicateContact);
        }

        self.enter(SubmissionState::Persisting);
        let record = build_record(&draft, phone);
        self.store.insert(record.clone()).await.map_err(|e| {
            tracing::error!("Saving contact failed: {}", e);
            SubmissionError::PersistError(e.to_string())
        })?;

        Ok(record)
    }

    fn finish(&self, result: Result<CanonicalContactRecord, SubmissionError>) -> SubmitOutcome {
        let ttl = self.settings.notification_ttl;
        let mut inner = self.lock();

        match result {
            Ok(record) => {
                inner.enter(SubmissionState::Succeeded);
                inner.draft = ContactDraft::default();
                inner.notification = Some(Notification::success(SUCCESS_MESSAGE, ttl));
                inner.enter(SubmissionState::Idle);
                drop(inner);

                tracing::info!("Added {} contact {}", record.category(), record.phone());
                self.metrics.record_submission_accepted();
                if let Some(directory) = &self.directory {
                    directory.invalidate(record.category());
                }

                SubmitOutcome::Succeeded {
                    record,
                    effect: SideEffect::NavigateHome {
                        after: self.settings.redirect_delay,
                    },
                }
            }
            Err(err) => {
                inner.enter(SubmissionState::Failed(err.clone()));
                inner.notification = Some(Notification::error(&err, ttl));
                inner.enter(SubmissionState::Idle);
                drop(inner);

                tracing::warn!("Submission rejected: {}", err);
                self.metrics.record_submission_rejected(&err);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Fill name and phone from a device contact.
    ///
    /// Only runs while no submission is in flight. An imported name replaces
    /// the draft's name only when it is non-empty; the phone always replaces
    /// the draft's phone. A dismissed picker leaves everything as it was.
    pub async fn import_from(&self, source: &dyn ContactSource) -> ImportOutcome {
        if self.state() != SubmissionState::Idle {
            return ImportOutcome::Ignored;
        }

        if !self.settings.import_capability.is_available() {
            return self.import_failed(SubmissionError::ImportUnavailable);
        }

        let payload = match source
            .select_one(&[ContactField::Name, ContactField::Phone])
            .await
        {
            PickResult::Selected(payload) => payload,
            PickResult::Cancelled => {
                return self.import_failed(SubmissionError::ImportCancelled)
            }
            PickResult::Unavailable => {
                return self.import_failed(SubmissionError::ImportUnavailable)
            }
        };

        match payload.normalize() {
            Ok(imported) => {
                let mut inner = self.lock();
                if !imported.name.is_empty() {
                    inner.draft.name = imported.name.clone();
                }
                inner.draft.phone = imported.phone.clone();
                ImportOutcome::Imported(imported)
            }
            Err(err) => self.import_failed(err),
        }
    }

    fn import_failed(&self, err: SubmissionError) -> ImportOutcome {
        if !err.is_user_visible() {
            tracing::debug!("Contact import stopped: {}", err);
            return ImportOutcome::Cancelled;
        }

        tracing::warn!("Contact import failed: {}", err);
        self.lock().notification =
            Some(Notification::error(&err, self.settings.notification_ttl));
        ImportOutcome::Failed(err)
    }
}
