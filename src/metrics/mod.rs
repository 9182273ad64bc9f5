//! Counters for store traffic and submission outcomes.

use crate::error::SubmissionError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared counters. Cloning is cheap and every clone updates the same values.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    store_requests_total: Arc<AtomicU64>,
    store_errors_total: Arc<AtomicU64>,
    store_duration_total_ms: Arc<AtomicU64>,
    contacts_fetched_total: Arc<AtomicU64>,
    submissions_accepted_total: Arc<AtomicU64>,
    submissions_invalid_total: Arc<AtomicU64>,
    submissions_duplicate_total: Arc<AtomicU64>,
    submissions_failed_total: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one store round trip that started at `start`.
    pub fn observe_request<T, E>(&self, start: Instant, result: &Result<T, E>) {
        self.store_requests_total.fetch_add(1, Ordering::Relaxed);
        self.store_duration_total_ms
            .fetch_add(start.elapsed().as_millis() as u64, Ordering::Relaxed);
        if result.is_err() {
            self.store_errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_contacts_fetched(&self, count: usize) {
        self.contacts_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_submission_accepted(&self) {
        self.submissions_accepted_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Count a rejected submission under the matching bucket.
    pub fn record_submission_rejected(&self, err: &SubmissionError) {
        let counter = if err.is_validation() {
            &self.submissions_invalid_total
        } else if *err == SubmissionError::DuplicateContact {
            &self.submissions_duplicate_total
        } else {
            &self.submissions_failed_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn store_requests_total(&self) -> u64 {
        self.store_requests_total.load(Ordering::Relaxed)
    }

    pub fn store_errors_total(&self) -> u64 {
        self.store_errors_total.load(Ordering::Relaxed)
    }

    /// Average store round trip in milliseconds.
    pub fn store_duration_avg_ms(&self) -> f64 {
        let total = self.store_duration_total_ms.load(Ordering::Relaxed);
        let count = self.store_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn contacts_fetched_total(&self) -> u64 {
        self.contacts_fetched_total.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            store_requests_total: self.store_requests_total(),
            store_errors_total: self.store_errors_total(),
            store_duration_avg_ms: self.store_duration_avg_ms(),
            contacts_fetched_total: self.contacts_fetched_total(),
            submissions_accepted_total: self.submissions_accepted_total.load(Ordering::Relaxed),
            submissions_invalid_total: self.submissions_invalid_total.load(Ordering::Relaxed),
            submissions_duplicate_total: self.submissions_duplicate_total.load(Ordering::Relaxed),
            submissions_failed_total: self.submissions_failed_total.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub store_requests_total: u64,
    pub store_errors_total: u64,
    pub store_duration_avg_ms: f64,
    pub contacts_fetched_total: u64,
    pub submissions_accepted_total: u64,
    pub submissions_invalid_total: u64,
    pub submissions_duplicate_total: u64,
    pub submissions_failed_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_observe_request() {
        let metrics = Metrics::new();
        let ok: Result<(), ()> = Ok(());
        let err: Result<(), ()> = Err(());

        metrics.observe_request(Instant::now(), &ok);
        metrics.observe_request(Instant::now(), &err);

        assert_eq!(metrics.store_requests_total(), 2);
        assert_eq!(metrics.store_errors_total(), 1);
    }

    #[test]
    fn test_submission_buckets() {
        let metrics = Metrics::new();
        metrics.record_submission_accepted();
        metrics.record_submission_rejected(&SubmissionError::InvalidPrefix);
        metrics.record_submission_rejected(&SubmissionError::MissingRequiredField("name"));
        metrics.record_submission_rejected(&SubmissionError::DuplicateContact);
        metrics.record_submission_rejected(&SubmissionError::PersistError("down".into()));

        let summary = metrics.summary();
        assert_eq!(summary.submissions_accepted_total, 1);
        assert_eq!(summary.submissions_invalid_total, 2);
        assert_eq!(summary.submissions_duplicate_total, 1);
        assert_eq!(summary.submissions_failed_total, 1);
    }

    #[test]
    fn test_average_without_requests() {
        assert_eq!(Metrics::new().store_duration_avg_ms(), 0.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        metrics.record_contacts_fetched(2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.contacts_fetched_total(), 200);
    }
}
