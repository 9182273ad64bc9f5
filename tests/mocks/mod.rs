pub mod mock_contact_source;
pub mod mock_contact_store;

#[allow(unused_imports)]
pub use mock_contact_source::MockContactSource;
#[allow(unused_imports)]
pub use mock_contact_store::MockContactStore;
