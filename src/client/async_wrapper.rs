//! Async wrapper around the synchronous SupabaseClient.
//!
//! HTTP calls run on tokio's blocking pool via `spawn_blocking` so they never
//! stall the async runtime.

use crate::client::SupabaseClient;
use crate::domain::Category;
use crate::error::{StoreError, StoreResult};
use crate::models::{CanonicalContactRecord, StoredContact};
use async_trait::async_trait;
use std::sync::Arc;

/// Async contact-table operations.
#[async_trait]
pub trait AsyncContactClient: Send + Sync {
    async fn query_by_phone(&self, digits: &str) -> StoreResult<Vec<StoredContact>>;
    async fn list_by_category(&self, category: Category) -> StoreResult<Vec<StoredContact>>;
    async fn insert(&self, record: CanonicalContactRecord) -> StoreResult<()>;
}

/// Async wrapper around SupabaseClient.
#[derive(Clone)]
pub struct AsyncSupabaseClient {
    client: Arc<SupabaseClient>,
}

impl AsyncSupabaseClient {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> StoreError {
    StoreError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncContactClient for AsyncSupabaseClient {
    async fn query_by_phone(&self, digits: &str) -> StoreResult<Vec<StoredContact>> {
        let client = self.client.clone();
        let digits = digits.to_string();

        tokio::task::spawn_blocking(move || client.query_by_phone(&digits))
            .await
            .map_err(join_error)?
    }

    async fn list_by_category(&self, category: Category) -> StoreResult<Vec<StoredContact>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_by_category(category))
            .await
            .map_err(join_error)?
    }

    async fn insert(&self, record: CanonicalContactRecord) -> StoreResult<()> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.insert(&record))
            .await
            .map_err(join_error)?
    }
}
