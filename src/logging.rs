//! Logging System
//!
//! Diagnostic logging through `tracing`. Logs go to stderr so they never mix
//! with the progress lines printed on stdout.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Result, SyncError};

/// Levels accepted by `--log-level`
pub const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Build the filter for a level name
pub fn filter_for(level: &str) -> Result<EnvFilter> {
    let level = level.to_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        return Err(SyncError::Config(format!(
            "invalid log level '{}'; expected one of {}",
            level,
            LEVELS.join(", ")
        )));
    }

    EnvFilter::try_new(format!("agent_sync={}", level))
        .map_err(|e| SyncError::Config(format!("invalid log filter: {}", e)))
}

/// Initialize the global subscriber
pub fn init_logging(level: &str) -> Result<()> {
    let filter = filter_for(level)?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| SyncError::Config(format!("failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_known_levels() {
        for level in LEVELS {
            assert!(filter_for(level).is_ok(), "{}", level);
        }
        assert!(filter_for("DEBUG").is_ok());
    }

    #[test]
    fn test_filter_for_unknown_level() {
        assert!(matches!(filter_for("loud"), Err(SyncError::Config(_))));
    }
}
