// Path Utilities
// Helper functions for path manipulation

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SyncError};

/// The invoking user's home directory
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| SyncError::Config("could not determine the home directory".to_string()))
}

/// Normalize a path by resolving . and .. components
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                components.pop();
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Resolve a path relative to a base directory
pub fn resolve_path(base: &Path, relative: &str) -> PathBuf {
    if Path::new(relative).is_absolute() {
        PathBuf::from(relative)
    } else {
        normalize_path(&base.join(relative))
    }
}

/// Expand a leading `~` or `~/` against `home`, otherwise resolve against `base`
pub fn expand_home(value: &str, home: &Path, base: &Path) -> PathBuf {
    if value == "~" {
        home.to_path_buf()
    } else if let Some(rest) = value.strip_prefix("~/") {
        normalize_path(&home.join(rest))
    } else {
        resolve_path(base, value)
    }
}

/// Render a path under `home` as `~/...` for messages
pub fn display_with_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("a/b/../c/./d");
        assert_eq!(normalize_path(path), PathBuf::from("a/c/d"));
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/home/user");
        assert_eq!(resolve_path(base, "documents"), PathBuf::from("/home/user/documents"));
        assert_eq!(resolve_path(base, "/etc/config"), PathBuf::from("/etc/config"));
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/user");
        let base = Path::new("/repo");
        assert_eq!(expand_home("~", home, base), PathBuf::from("/home/user"));
        assert_eq!(
            expand_home("~/.claude/agents", home, base),
            PathBuf::from("/home/user/.claude/agents")
        );
        assert_eq!(expand_home("defs", home, base), PathBuf::from("/repo/defs"));
        assert_eq!(expand_home("/opt/defs", home, base), PathBuf::from("/opt/defs"));
    }

    #[test]
    fn test_display_with_home() {
        let home = Path::new("/home/user");
        assert_eq!(
            display_with_home(Path::new("/home/user/.claude/agents"), home),
            "~/.claude/agents"
        );
        assert_eq!(display_with_home(Path::new("/srv/agents"), home), "/srv/agents");
    }
}
