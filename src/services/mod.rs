//! Application service layer.
//!
//! Services hold the decision logic of the directory: checking for
//! duplicates, driving a submission from draft to stored record, and
//! serving category listings. They talk to the outside world only through
//! the `ContactStore` and `ContactSource` traits.

pub mod directory;
pub mod duplicate_arbiter;
pub mod submission;

pub use directory::DirectoryService;
pub use duplicate_arbiter::{DuplicateArbiter, DuplicateCheck};
pub use submission::{
    build_record, validate_draft, ImportOutcome, SideEffect, SubmissionOrchestrator,
    SubmissionSettings, SubmissionState, SubmitOutcome,
};
