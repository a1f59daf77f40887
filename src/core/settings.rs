// Run Settings
// Resolves CLI overrides, the repository file, and compiled defaults into one run's settings

use std::path::{Component, Path, PathBuf};

use super::app_config::{AppConfig, BootstrapSettings, MissingRemotePolicy};
use super::sync_config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::operations::GitOps;
use crate::utilities::{display_with_home, expand_home, home_dir, resolve_path};

/// Values supplied on the command line; `None` defers to lower layers
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub target_dir: Option<String>,
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub missing_remote: Option<MissingRemotePolicy>,
    /// Explicit repository config file; must exist when given
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub no_push: bool,
}

/// Fully resolved settings for a single sync run
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Root of the git work tree
    pub work_tree: PathBuf,

    /// External source directory
    pub source_dir: PathBuf,

    /// Source directory as shown in messages (`~/...` when under home)
    pub source_display: String,

    /// Tracked directory, relative to `work_tree`
    pub target_dir: PathBuf,

    pub branch: String,
    pub remote: String,
    pub missing_remote: MissingRemotePolicy,
    pub push: bool,
    pub dry_run: bool,
    pub bootstrap: BootstrapSettings,
}

impl SyncSettings {
    /// Resolve settings for a run started in `work_dir`
    pub fn resolve(work_dir: &Path, overrides: &Overrides) -> Result<Self> {
        let home = home_dir().ok();
        Self::resolve_with(work_dir, overrides, &AppConfig::default(), home.as_deref())
    }

    /// Resolve settings against explicit defaults and home directory
    pub fn resolve_with(
        work_dir: &Path,
        overrides: &Overrides,
        app: &AppConfig,
        home: Option<&Path>,
    ) -> Result<Self> {
        let work_tree = GitOps::work_tree_root(work_dir)?;

        let repo_config = match &overrides.config {
            Some(path) => SyncConfig::load(&resolve_path(work_dir, &path.to_string_lossy())),
            None => SyncConfig::load_optional(&work_tree.join(&app.repo_config_file)),
        }
        .map_err(|e| SyncError::Config(format!("{:#}", e)))?;

        let source_dir = match (&overrides.source, &repo_config.source) {
            (Some(path), _) => resolve_path(work_dir, &path.to_string_lossy()),
            (None, Some(value)) => match home {
                Some(home) => expand_home(value, home, &work_tree),
                None if value.starts_with('~') => {
                    return Err(SyncError::Config(
                        "could not determine the home directory".to_string(),
                    ))
                }
                None => resolve_path(&work_tree, value),
            },
            (None, None) => {
                let home = home.ok_or_else(|| {
                    SyncError::Config("could not determine the home directory".to_string())
                })?;
                home.join(&app.sync.source_subdir)
            }
        };

        let source_display = match home {
            Some(home) => display_with_home(&source_dir, home),
            None => source_dir.display().to_string(),
        };

        let target_dir = overrides
            .target_dir
            .clone()
            .or(repo_config.target_dir)
            .unwrap_or_else(|| app.sync.target_dir.clone());
        let target_dir = validate_target_dir(&target_dir)?;

        let branch = non_empty(
            "branch",
            overrides.branch.clone().or(repo_config.branch),
            &app.sync.branch,
        )?;
        let remote = non_empty(
            "remote",
            overrides.remote.clone().or(repo_config.remote),
            &app.sync.remote,
        )?;

        let missing_remote = overrides
            .missing_remote
            .or(repo_config.missing_remote)
            .unwrap_or(app.sync.missing_remote);

        let push = !overrides.no_push && repo_config.push.unwrap_or(app.sync.push);

        Ok(Self {
            work_tree,
            source_dir,
            source_display,
            target_dir,
            branch,
            remote,
            missing_remote,
            push,
            dry_run: overrides.dry_run,
            bootstrap: app.bootstrap.clone(),
        })
    }

    /// Absolute path of the tracked directory
    pub fn target_path(&self) -> PathBuf {
        self.work_tree.join(&self.target_dir)
    }
}

fn non_empty(name: &str, value: Option<String>, default: &str) -> Result<String> {
    let value = value.unwrap_or_else(|| default.to_string());
    if value.trim().is_empty() {
        return Err(SyncError::Config(format!("{} must not be empty", name)));
    }
    Ok(value)
}

/// The tracked directory must stay inside the work tree; `.` components are dropped
fn validate_target_dir(value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    let path: PathBuf = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    if value.trim().is_empty() || escapes || path.as_os_str().is_empty() {
        return Err(SyncError::Config(format!(
            "target_dir must be a relative path inside the repository: {}",
            value
        )));
    }

    Ok(path)
}
