// Sync Events
// Progress events emitted by the sync procedure and the sinks that receive them

use std::path::PathBuf;

use crate::operations::copy::CopiedFile;

/// Progress events emitted while a sync runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A procedure step is starting
    Step(String),

    /// A file was copied into the tracked directory
    Copied(CopiedFile),

    /// A file would be copied (dry run)
    WouldCopy(PathBuf),

    /// A source entry was left out of the non-recursive copy
    Skipped(PathBuf),

    /// Informational note that is not an error
    Note(String),
}

/// Receiver of sync events
pub trait EventSink {
    fn emit(&mut self, event: SyncEvent);
}

/// Collects events in memory
impl EventSink for Vec<SyncEvent> {
    fn emit(&mut self, event: SyncEvent) {
        self.push(event);
    }
}
