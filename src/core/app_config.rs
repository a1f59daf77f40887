// Application Configuration
// Defaults compiled from config.yaml at build time
// Modify config.yaml and rebuild to change these values

use serde::{Deserialize, Serialize};

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// What the publish step does when no remote is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRemotePolicy {
    /// Keep the commit local and finish successfully
    Skip,
    /// Abort with an error after committing
    Fail,
}

impl MissingRemotePolicy {
    /// Parse a policy name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Application-level configuration for agent-sync
/// Values are compiled in from config.yaml at build time
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Sync behavior defaults
    pub sync: SyncDefaults,

    /// Placeholder content used when bootstrapping an empty repository
    pub bootstrap: BootstrapSettings,

    /// Name of the per-repository override file
    pub repo_config_file: String,
}

#[derive(Debug, Clone)]
pub struct SyncDefaults {
    /// Source directory relative to the home directory
    pub source_subdir: String,

    /// Tracked directory relative to the work-tree root
    pub target_dir: String,

    /// Branch that receives direct pushes
    pub branch: String,

    /// Remote name
    pub remote: String,

    pub missing_remote: MissingRemotePolicy,

    /// Push after committing
    pub push: bool,
}

#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    pub readme_name: String,
    pub readme_title: String,
    pub initial_commit_message: String,
}

impl BootstrapSettings {
    /// Placeholder README content
    pub fn readme_contents(&self) -> String {
        format!(
            "# {}\n\nAgent definition files synced by agent-sync.\n",
            self.readme_title
        )
    }
}

impl Default for SyncDefaults {
    fn default() -> Self {
        Self {
            source_subdir: compiled::SOURCE_SUBDIR.to_string(),
            target_dir: compiled::TARGET_DIR.to_string(),
            branch: compiled::BRANCH.to_string(),
            remote: compiled::REMOTE.to_string(),
            missing_remote: MissingRemotePolicy::parse(compiled::MISSING_REMOTE)
                .unwrap_or(MissingRemotePolicy::Skip),
            push: compiled::PUSH,
        }
    }
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            readme_name: compiled::README_NAME.to_string(),
            readme_title: compiled::README_TITLE.to_string(),
            initial_commit_message: compiled::INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sync: SyncDefaults::default(),
            bootstrap: BootstrapSettings::default(),
            repo_config_file: compiled::REPO_CONFIG_FILE.to_string(),
        }
    }
}
