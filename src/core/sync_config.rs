// Repository Configuration
// Per-repository overrides read from agent-sync.yaml at the work-tree root

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::app_config::MissingRemotePolicy;

/// Repository-level configuration
/// Every key is optional; absent keys fall back to the compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Source directory; a leading `~/` expands to the home directory
    #[serde(default)]
    pub source: Option<String>,

    /// Tracked directory relative to the work-tree root
    #[serde(default)]
    pub target_dir: Option<String>,

    /// Branch that receives direct pushes
    #[serde(default)]
    pub branch: Option<String>,

    /// Remote name
    #[serde(default)]
    pub remote: Option<String>,

    /// Behavior when the remote is not configured
    #[serde(default)]
    pub missing_remote: Option<MissingRemotePolicy>,

    /// Push after committing
    #[serde(default)]
    pub push: Option<bool>,
}

impl SyncConfig {
    /// Load repository configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse repository configuration from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SyncConfig =
            serde_yaml::from_str(content).context("Invalid agent-sync YAML")?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise return an empty configuration
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no repository config file");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial() {
        let config = SyncConfig::parse("branch: trunk\nmissing_remote: fail\n").unwrap();
        assert_eq!(config.branch.as_deref(), Some("trunk"));
        assert_eq!(config.missing_remote, Some(MissingRemotePolicy::Fail));
        assert!(config.source.is_none());
        assert!(config.push.is_none());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(SyncConfig::parse("  \n").unwrap(), SyncConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(SyncConfig::parse("sorce: ~/agents\n").is_err());
    }

    #[test]
    fn test_load_optional_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::load_optional(&dir.path().join("agent-sync.yaml")).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent-sync.yaml");
        fs::write(&path, "push: [not, a, bool]\n").unwrap();

        let err = SyncConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("agent-sync.yaml"));
    }
}
