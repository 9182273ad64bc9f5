mod supabase_contact_store;
mod traits;

pub use supabase_contact_store::SupabaseContactStore;
pub use traits::ContactStore;
