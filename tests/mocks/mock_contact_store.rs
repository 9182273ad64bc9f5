use async_trait::async_trait;
use society_directory::domain::Category;
use society_directory::error::{StoreError, StoreResult};
use society_directory::models::{CanonicalContactRecord, StoredContact};
use society_directory::repositories::ContactStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Failures {
    query: bool,
    insert: bool,
    panic_on_insert: bool,
}

/// Mock contact store for testing.
///
/// Keeps rows in memory, counts calls per method and can be told to fail
/// lookups or inserts.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactStore {
    contacts: Arc<Mutex<Vec<StoredContact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failures: Arc<Mutex<Failures>>,
}

#[allow(dead_code)]
impl MockContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(Failures::default())),
        }
    }

    /// Seed a row as if it had been stored earlier.
    pub fn add_contact(&self, name: &str, phone: &str, category: Category) {
        let mut contacts = self.contacts.lock().unwrap();
        let id = (contacts.len() + 1).to_string();
        contacts.push(StoredContact {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            category: Some(category.as_str().to_string()),
            ..Default::default()
        });
    }

    /// Seed a raw row, e.g. one with an odd phone format.
    pub fn add_row(&self, row: StoredContact) {
        self.contacts.lock().unwrap().push(row);
    }

    pub fn contacts(&self) -> Vec<StoredContact> {
        self.contacts.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    pub fn fail_queries(&self, fail: bool) {
        self.failures.lock().unwrap().query = fail;
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.failures.lock().unwrap().insert = fail;
    }

    pub fn panic_on_insert(&self, panic: bool) {
        self.failures.lock().unwrap().panic_on_insert = panic;
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MockContactStore {
    async fn query_by_phone(&self, digits: &str) -> StoreResult<Vec<StoredContact>> {
        self.track_call("query_by_phone");

        // Give concurrent callers a chance to run, like a real round trip
        tokio::task::yield_now().await;

        if self.failures.lock().unwrap().query {
            return Err(StoreError::HttpError("Connection failed".to_string()));
        }

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| c.phone == digits)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: CanonicalContactRecord) -> StoreResult<()> {
        self.track_call("insert");

        let (fail, panic) = {
            let failures = self.failures.lock().unwrap();
            (failures.insert, failures.panic_on_insert)
        };
        if panic {
            panic!("store exploded");
        }
        if fail {
            return Err(StoreError::ApiError {
                status: 500,
                message: "insert failed".to_string(),
            });
        }

        let mut contacts = self.contacts.lock().unwrap();
        let mut row = StoredContact::from(record);
        row.id = (contacts.len() + 1).to_string();
        contacts.push(row);
        Ok(())
    }

    async fn list_by_category(&self, category: Category) -> StoreResult<Vec<StoredContact>> {
        self.track_call("list_by_category");

        if self.failures.lock().unwrap().query {
            return Err(StoreError::Timeout);
        }

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().filter(|c| c.is_in(category)).cloned().collect())
    }
}
