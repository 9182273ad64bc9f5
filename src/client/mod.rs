//! HTTP client for the Supabase REST (PostgREST) endpoint holding contacts.
//!
//! This module provides a synchronous client that can be used from async
//! contexts via `tokio::task::spawn_blocking`. It handles authentication
//! headers, filter encoding and error mapping for the contacts table.

mod async_wrapper;
pub use async_wrapper::{AsyncContactClient, AsyncSupabaseClient};

use crate::config::Config;
use crate::domain::Category;
use crate::error::{StoreError, StoreResult};
use crate::metrics::Metrics;
use crate::models::{CanonicalContactRecord, StoredContact};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Columns fetched for the duplicate check.
const DUPLICATE_CHECK_COLUMNS: &str = "id,name,phone";

/// HTTP client for the contacts table.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SupabaseClient {
    /// Supabase project URL
    base_url: String,

    /// Anon key, sent both as `apikey` and as bearer token
    api_key: String,

    /// Table holding service contacts
    table: String,

    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

impl SupabaseClient {
    /// Create a new SupabaseClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.supabase_url.clone(),
            api_key: config.supabase_key.clone(),
            table: config.contacts_table.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a client against a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let config = Config {
            supabase_url: base_url,
            supabase_key: api_key,
            ..Config::default()
        };
        Self::new(&config)
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build the table URL with an optional query string.
    fn table_url(&self, query: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if query.is_empty() {
            format!("{}/rest/v1/{}", base, self.table)
        } else {
            format!("{}/rest/v1/{}?{}", base, self.table, query)
        }
    }

    fn get(&self, url: &str) -> StoreResult<ureq::Response> {
        let start = Instant::now();
        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        self.metrics.observe_request(start, &result);
        result
    }

    fn post(&self, url: &str, body: &serde_json::Value) -> StoreResult<ureq::Response> {
        let start = Instant::now();
        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .set("Prefer", "return=minimal")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => tracing::debug!("POST {} - status {}", url, response.status()),
            Err(e) => tracing::error!("POST {} - Error: {:?}", url, e),
        }

        self.metrics.observe_request(start, &result);
        result
    }

    /// Map a ureq error to a StoreError.
    fn map_error(&self, error: ureq::Error) -> StoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => StoreError::Unauthorized,
                    404 => StoreError::NotFound(message),
                    409 => StoreError::Conflict(message),
                    429 => StoreError::RateLimitExceeded,
                    _ => StoreError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    StoreError::HttpError("Connection failed".to_string())
                }
                ureq::ErrorKind::Io if is_timeout(&transport) => StoreError::Timeout,
                _ => StoreError::HttpError(transport.to_string()),
            },
        }
    }

    fn read_rows(&self, response: ureq::Response) -> StoreResult<Vec<StoredContact>> {
        let body = response
            .into_string()
            .map_err(|e| StoreError::HttpError(e.to_string()))?;
        let rows: Vec<StoredContact> = serde_json::from_str(&body)?;
        self.metrics.record_contacts_fetched(rows.len());
        Ok(rows)
    }

    /// Rows whose `phone` column equals `digits` exactly.
    pub fn query_by_phone(&self, digits: &str) -> StoreResult<Vec<StoredContact>> {
        let url = self.table_url(&format!(
            "select={}&phone=eq.{}",
            DUPLICATE_CHECK_COLUMNS,
            urlencoding::encode(digits)
        ));
        let response = self.get(&url)?;
        self.read_rows(response)
    }

    /// All rows of one category, ordered by name.
    pub fn list_by_category(&self, category: Category) -> StoreResult<Vec<StoredContact>> {
        let url = self.table_url(&format!(
            "select=*&category=eq.{}&order=name.asc",
            urlencoding::encode(category.as_str())
        ));
        let response = self.get(&url)?;
        self.read_rows(response)
    }

    /// Insert one record.
    pub fn insert(&self, record: &CanonicalContactRecord) -> StoreResult<()> {
        tracing::info!(
            "Inserting {} contact with phone {}",
            record.category(),
            record.phone()
        );
        let body = serde_json::to_value(record)?;
        self.post(&self.table_url(""), &body)?;
        Ok(())
    }
}

/// ureq reports read and connect timeouts as an io `TimedOut` source.
fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .is_some_and(|io| {
            matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
}
