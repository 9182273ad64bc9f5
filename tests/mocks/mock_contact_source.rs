use async_trait::async_trait;
use society_directory::models::ExternalContactPayload;
use society_directory::platform::{ContactField, ContactSource, PickResult};
use std::sync::{Arc, Mutex};

/// Mock device picker that hands back a preset result.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactSource {
    available: bool,
    result: PickResult,
    requests: Arc<Mutex<Vec<Vec<ContactField>>>>,
}

#[allow(dead_code)]
impl MockContactSource {
    /// A picker that returns the contact described by `json`.
    pub fn selecting(json: &str) -> Self {
        let payload: ExternalContactPayload = serde_json::from_str(json).unwrap();
        Self::with_result(PickResult::Selected(payload))
    }

    pub fn cancelling() -> Self {
        Self::with_result(PickResult::Cancelled)
    }

    /// A platform without a picker.
    pub fn missing() -> Self {
        Self {
            available: false,
            ..Self::with_result(PickResult::Unavailable)
        }
    }

    pub fn with_result(result: PickResult) -> Self {
        Self {
            available: true,
            result,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fields asked for on each pick.
    pub fn requests(&self) -> Vec<Vec<ContactField>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactSource for MockContactSource {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn select_one(&self, fields: &[ContactField]) -> PickResult {
        self.requests.lock().unwrap().push(fields.to_vec());
        self.result.clone()
    }
}
