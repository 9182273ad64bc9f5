use crate::domain::Category;
use crate::error::StoreResult;
use crate::models::{CanonicalContactRecord, StoredContact};
use async_trait::async_trait;

/// The remote table holding service contacts.
///
/// There is no transaction between `query_by_phone` and `insert`; two
/// clients submitting the same number at once can both succeed.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Rows whose stored phone equals `digits` exactly.
    async fn query_by_phone(&self, digits: &str) -> StoreResult<Vec<StoredContact>>;

    /// Persist a new contact. The record is handed over to the store.
    async fn insert(&self, record: CanonicalContactRecord) -> StoreResult<()>;

    /// Every contact filed under `category`.
    async fn list_by_category(&self, category: Category) -> StoreResult<Vec<StoredContact>>;
}
