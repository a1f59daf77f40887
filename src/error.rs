//! Error types for agent-sync.

use std::path::PathBuf;

use thiserror::Error;

/// agent-sync error type.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Working location is not inside a git work tree
    #[error("not inside a git work tree: {path}")]
    NotARepository { path: PathBuf },

    /// Source directory does not exist
    #[error("source directory not found: {path}")]
    SourceMissing { path: PathBuf },

    /// No remote configured while the policy requires one
    #[error("no remote named '{remote}' is configured")]
    NoRemote { remote: String },

    /// Git command failed
    #[error("git command '{command}' failed: {stderr}")]
    Git { command: String, stderr: String },

    /// Copying a single file failed
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Whether the error was raised by a precondition check, before any mutation.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SyncError::NotARepository { .. } | SyncError::SourceMissing { .. }
        )
    }
}

/// Result type alias for agent-sync.
pub type Result<T> = std::result::Result<T, SyncError>;
