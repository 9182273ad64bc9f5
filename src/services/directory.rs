//! Browsing contacts by category.

use crate::cache::TimedCache;
use crate::domain::Category;
use crate::error::StoreResult;
use crate::models::StoredContact;
use crate::repositories::ContactStore;
use std::sync::Arc;

/// Category listings, cached for a short while.
///
/// Matching is by exact category only. Clones share one cache.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn ContactStore>,
    cache: TimedCache<Category, Vec<StoredContact>>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn ContactStore>, cache_ttl_secs: u64) -> Self {
        Self {
            store,
            cache: TimedCache::new(cache_ttl_secs),
        }
    }

    /// Contacts filed under `category`, from cache when fresh.
    pub async fn contacts_in_category(&self, category: Category) -> StoreResult<Vec<StoredContact>> {
        if let Some(cached) = self.cache.get(&category) {
            tracing::trace!("Listing cache hit for {}", category);
            return Ok(cached);
        }

        let contacts = self.store.list_by_category(category).await?;
        tracing::debug!("Fetched {} {} contact(s)", contacts.len(), category);
        self.cache.insert(category, contacts.clone());
        Ok(contacts)
    }

    /// Forget the cached listing for one category.
    pub fn invalidate(&self, category: Category) {
        self.cache.invalidate(&category);
    }
}
