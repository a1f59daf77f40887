// Agent Sync Library
// Copies agent definition files into a git repository and publishes them to main

// Core infrastructure - configuration, settings, events
pub mod core;

// Error types
pub mod error;

// Logging setup
pub mod logging;

// Operations - git, copy, and the sync procedure
pub mod operations;

// UI - console reporting
pub mod ui;

// Utilities - helper functions and tools
pub mod utilities;

// Re-export commonly used items for convenience
pub use crate::core::{AppConfig, Overrides, SyncSettings};
pub use error::{Result, SyncError};
pub use operations::{GitOps, PushOutcome, SyncOutcome, SyncProcedure};
