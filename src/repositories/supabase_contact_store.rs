use crate::client::AsyncContactClient;
use crate::domain::Category;
use crate::error::StoreResult;
use crate::models::{CanonicalContactRecord, StoredContact};
use crate::repositories::traits::ContactStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact store backed by the Supabase contacts table.
///
/// Delegates to the async client and keeps only the rows that really match,
/// in case a proxy or view in front of the table ignores a filter.
pub struct SupabaseContactStore {
    client: Arc<dyn AsyncContactClient>,
}

impl SupabaseContactStore {
    pub fn new(client: Arc<dyn AsyncContactClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactStore for SupabaseContactStore {
    async fn query_by_phone(&self, digits: &str) -> StoreResult<Vec<StoredContact>> {
        let mut rows = self.client.query_by_phone(digits).await?;
        rows.retain(|row| row.phone == digits);
        Ok(rows)
    }

    async fn insert(&self, record: CanonicalContactRecord) -> StoreResult<()> {
        self.client.insert(record).await
    }

    async fn list_by_category(&self, category: Category) -> StoreResult<Vec<StoredContact>> {
        let mut rows = self.client.list_by_category(category).await?;
        rows.retain(|row| row.is_in(category));
        Ok(rows)
    }
}
