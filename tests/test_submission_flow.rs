//! Integration tests for the contact submission pipeline.

mod mocks;

use mocks::MockContactStore;
use society_directory::domain::Category;
use society_directory::error::SubmissionError;
use society_directory::metrics::Metrics;
use society_directory::models::{ContactDraft, NotificationKind};
use society_directory::services::{
    DirectoryService, SideEffect, SubmissionOrchestrator, SubmissionSettings, SubmissionState,
    SubmitOutcome,
};
use std::sync::Arc;
use std::time::Duration;

fn orchestrator(store: &MockContactStore) -> SubmissionOrchestrator {
    SubmissionOrchestrator::new(Arc::new(store.clone()), SubmissionSettings::default())
}

fn food_draft() -> ContactDraft {
    ContactDraft::new("A", "9876543210", Category::Food).with_description("")
}

fn expect_failure(outcome: SubmitOutcome) -> SubmissionError {
    match outcome {
        SubmitOutcome::Failed(err) => err,
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_then_resubmit_is_duplicate() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(food_draft());
    let outcome = orchestrator.submit().await;

    let SubmitOutcome::Succeeded { record, effect } = outcome else {
        panic!("Expected success, got {:?}", outcome);
    };
    assert_eq!(record.name(), "A");
    assert_eq!(record.phone().as_str(), "9876543210");
    assert_eq!(record.category(), Category::Food);
    assert_eq!(record.description(), "");
    assert_eq!(
        effect,
        SideEffect::NavigateHome {
            after: Duration::from_millis(1500)
        }
    );

    // Success clears the form
    assert_eq!(orchestrator.draft(), ContactDraft::default());
    assert_eq!(store.contacts().len(), 1);

    orchestrator.set_draft(food_draft());
    let err = expect_failure(orchestrator.submit().await);
    assert_eq!(err, SubmissionError::DuplicateContact);
    assert_eq!(store.get_call_count("insert"), 1);
    assert_eq!(store.contacts().len(), 1);
}

#[tokio::test]
async fn test_state_trail_on_success() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(food_draft());
    orchestrator.submit().await;

    assert_eq!(
        orchestrator.transitions(),
        vec![
            SubmissionState::Validating,
            SubmissionState::CheckingDuplicate,
            SubmissionState::Persisting,
            SubmissionState::Succeeded,
            SubmissionState::Idle,
        ]
    );
    assert_eq!(orchestrator.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_validation_failure_keeps_draft() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    let draft = ContactDraft::new("Dr. Rao", "9876543210", Category::Doctor);
    orchestrator.set_draft(draft.clone());

    let err = expect_failure(orchestrator.submit().await);
    assert_eq!(err, SubmissionError::MissingSubType(Category::Doctor));
    assert_eq!(orchestrator.draft(), draft);
    assert_eq!(
        orchestrator.transitions(),
        vec![
            SubmissionState::Validating,
            SubmissionState::Failed(SubmissionError::MissingSubType(Category::Doctor)),
            SubmissionState::Idle,
        ]
    );

    // Store is never touched for an invalid draft
    assert_eq!(store.get_call_count("query_by_phone"), 0);
    assert_eq!(store.get_call_count("insert"), 0);

    let notification = orchestrator.notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Please specify the doctor type");
}

#[tokio::test]
async fn test_fix_and_resubmit() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(ContactDraft::new("Ravi", "98765", Category::Plumber));
    let err = expect_failure(orchestrator.submit().await);
    assert_eq!(err, SubmissionError::InvalidLength { digits: 5 });

    orchestrator.update_draft(|draft| draft.phone = "98765 43210".to_string());
    let outcome = orchestrator.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Succeeded { .. }));
    assert_eq!(store.contacts()[0].phone, "9876543210");
}

#[tokio::test]
async fn test_invalid_prefix() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(ContactDraft::new("Ravi", "5876543210", Category::Electrician));
    let err = expect_failure(orchestrator.submit().await);
    assert_eq!(err, SubmissionError::InvalidPrefix);
}

#[tokio::test]
async fn test_doctor_description_is_merged() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(
        ContactDraft::new("Dr. Rao", "9876543210", Category::Doctor)
            .with_doctor_type("Cardiologist")
            .with_description("mornings only"),
    );
    orchestrator.submit().await;

    let stored = store.contacts();
    assert_eq!(
        stored[0].description.as_deref(),
        Some("Cardiologist - mornings only")
    );
    assert_eq!(stored[0].category.as_deref(), Some("Doctor"));
}

#[tokio::test]
async fn test_store_unavailable_is_not_unique() {
    let store = MockContactStore::new();
    store.fail_queries(true);
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(food_draft());
    let err = expect_failure(orchestrator.submit().await);

    assert!(matches!(err, SubmissionError::StoreUnavailable(_)));
    assert_eq!(store.get_call_count("insert"), 0);
    assert_eq!(orchestrator.state(), SubmissionState::Idle);
    assert_eq!(orchestrator.draft(), food_draft());
}

#[tokio::test]
async fn test_persist_failure() {
    let store = MockContactStore::new();
    store.fail_inserts(true);
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(food_draft());
    let err = expect_failure(orchestrator.submit().await);

    assert!(matches!(err, SubmissionError::PersistError(_)));
    assert!(orchestrator
        .notification()
        .unwrap()
        .message
        .contains("Please try again"));

    // No automatic retry; a manual one works once the store recovers
    assert_eq!(store.get_call_count("insert"), 1);
    store.fail_inserts(false);
    assert!(matches!(
        orchestrator.submit().await,
        SubmitOutcome::Succeeded { .. }
    ));
}

#[tokio::test]
async fn test_panic_is_contained() {
    let store = MockContactStore::new();
    store.panic_on_insert(true);
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(food_draft());
    let err = expect_failure(orchestrator.submit().await);

    assert_eq!(
        err,
        SubmissionError::PersistError("an unexpected error occurred".to_string())
    );
    assert_eq!(orchestrator.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_concurrent_submit_is_ignored() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);
    orchestrator.set_draft(food_draft());

    let (first, second) = tokio::join!(orchestrator.submit(), orchestrator.submit());

    assert!(matches!(first, SubmitOutcome::Succeeded { .. }));
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(store.get_call_count("query_by_phone"), 1);
    assert_eq!(store.get_call_count("insert"), 1);
}

#[tokio::test]
async fn test_success_notification() {
    let store = MockContactStore::new();
    let orchestrator = orchestrator(&store);

    orchestrator.set_draft(food_draft());
    orchestrator.submit().await;

    let notification = orchestrator.notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, "Contact added successfully!");
    assert_eq!(notification.ttl, Duration::from_secs(4));

    orchestrator.dismiss_notification();
    assert!(orchestrator.notification().is_none());
}

#[tokio::test]
async fn test_custom_settings() {
    let store = MockContactStore::new();
    let settings = SubmissionSettings {
        redirect_delay: Duration::from_millis(10),
        notification_ttl: Duration::from_secs(1),
        ..SubmissionSettings::default()
    };
    let orchestrator = SubmissionOrchestrator::new(Arc::new(store.clone()), settings);

    orchestrator.set_draft(food_draft());
    match orchestrator.submit().await {
        SubmitOutcome::Succeeded { effect, .. } => assert_eq!(
            effect,
            SideEffect::NavigateHome {
                after: Duration::from_millis(10)
            }
        ),
        other => panic!("Expected success, got {:?}", other),
    }
    assert_eq!(orchestrator.notification().unwrap().ttl, Duration::from_secs(1));
}

#[tokio::test]
async fn test_metrics_count_outcomes() {
    let store = MockContactStore::new();
    let metrics = Metrics::new();
    let orchestrator = orchestrator(&store).with_metrics(metrics.clone());

    orchestrator.set_draft(food_draft());
    orchestrator.submit().await;
    orchestrator.set_draft(food_draft());
    orchestrator.submit().await;
    orchestrator.set_draft(ContactDraft::new("", "9876543210", Category::Food));
    orchestrator.submit().await;
    store.fail_queries(true);
    orchestrator.set_draft(ContactDraft::new("B", "9123456780", Category::Food));
    orchestrator.submit().await;

    let summary = metrics.summary();
    assert_eq!(summary.submissions_accepted_total, 1);
    assert_eq!(summary.submissions_duplicate_total, 1);
    assert_eq!(summary.submissions_invalid_total, 1);
    assert_eq!(summary.submissions_failed_total, 1);
}

#[tokio::test]
async fn test_success_refreshes_category_listing() {
    let store = MockContactStore::new();
    let directory = DirectoryService::new(Arc::new(store.clone()), 300);
    let orchestrator = orchestrator(&store).with_directory(directory.clone());

    assert!(directory
        .contacts_in_category(Category::Food)
        .await
        .unwrap()
        .is_empty());

    orchestrator.set_draft(food_draft());
    orchestrator.submit().await;

    let listed = directory.contacts_in_category(Category::Food).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(store.get_call_count("list_by_category"), 2);
}
