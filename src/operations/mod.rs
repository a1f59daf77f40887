// Operations module
// Business logic for the sync procedure, file copying, and git integration

pub mod copy;
pub mod git;
pub mod sync;

pub use copy::{CopiedFile, CopyEngine, SourceListing};
pub use git::GitOps;
pub use sync::{commit_message, PushOutcome, SyncOutcome, SyncProcedure};
