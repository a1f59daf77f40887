// Git Operations
// Thin wrappers over the git command line, run one at a time to completion

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Result, SyncError};

/// Git operations handler
pub struct GitOps;

impl GitOps {
    /// Run git and return its trimmed stdout, failing on a non-zero exit
    fn run(repo_path: &Path, args: &[&str]) -> Result<String> {
        let output = Self::output(repo_path, args)?;

        if !output.status.success() {
            return Err(Self::failure(args, &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run git and report only whether it exited successfully
    fn probe(repo_path: &Path, args: &[&str]) -> Result<bool> {
        Ok(Self::output(repo_path, args)?.status.success())
    }

    fn output(repo_path: &Path, args: &[&str]) -> Result<Output> {
        tracing::debug!(cwd = %repo_path.display(), "git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(repo_path)
            .output()?;

        Ok(output)
    }

    fn failure(args: &[&str], output: &Output) -> SyncError {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("exit status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr
        };

        SyncError::Git {
            command: args.join(" "),
            stderr,
        }
    }

    /// Root of the work tree containing `path`
    pub fn work_tree_root(path: &Path) -> Result<PathBuf> {
        let not_a_repo = || SyncError::NotARepository {
            path: path.to_path_buf(),
        };

        if !path.is_dir() {
            return Err(not_a_repo());
        }

        let output = Self::output(path, &["rev-parse", "--is-inside-work-tree"])?;
        if !output.status.success() || String::from_utf8_lossy(&output.stdout).trim() != "true" {
            return Err(not_a_repo());
        }

        let root = Self::run(path, &["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(root))
    }

    /// Check whether the repository has at least one commit
    pub fn has_commits(repo_path: &Path) -> Result<bool> {
        Self::probe(repo_path, &["rev-parse", "--verify", "--quiet", "HEAD"])
    }

    /// Check whether a remote with this name is configured
    pub fn has_remote(repo_path: &Path, remote: &str) -> Result<bool> {
        Self::probe(repo_path, &["remote", "get-url", remote])
    }

    /// Check whether the remote already has `branch`
    ///
    /// Contacts the remote. An unreachable remote is an error, not "absent".
    pub fn remote_has_branch(repo_path: &Path, remote: &str, branch: &str) -> Result<bool> {
        // A full ref keeps `main` from tail-matching `refs/heads/feature/main`
        let reference = format!("refs/heads/{}", branch);
        let args = ["ls-remote", "--exit-code", "--heads", remote, &reference];
        let output = Self::output(repo_path, &args)?;

        match output.status.code() {
            Some(0) => Ok(true),
            // --exit-code reports "no matching refs" as status 2
            Some(2) => Ok(false),
            _ => Err(Self::failure(&args, &output)),
        }
    }

    /// Check whether a local branch exists
    pub fn local_branch_exists(repo_path: &Path, branch: &str) -> Result<bool> {
        let reference = format!("refs/heads/{}", branch);
        Self::probe(repo_path, &["show-ref", "--verify", "--quiet", &reference])
    }

    /// Get the current branch name
    pub fn current_branch(repo_path: &Path) -> Result<String> {
        Self::run(repo_path, &["branch", "--show-current"])
    }

    /// Switch to an existing local branch
    pub fn checkout(repo_path: &Path, branch: &str) -> Result<()> {
        Self::run(repo_path, &["checkout", branch]).map(|_| ())
    }

    /// Create `branch` from HEAD and switch to it
    pub fn checkout_new(repo_path: &Path, branch: &str) -> Result<()> {
        Self::run(repo_path, &["checkout", "-b", branch]).map(|_| ())
    }

    /// Create `branch` tracking `remote/branch` and switch to it
    pub fn checkout_tracking(repo_path: &Path, remote: &str, branch: &str) -> Result<()> {
        Self::run(repo_path, &["fetch", remote, branch])?;
        let upstream = format!("{}/{}", remote, branch);
        Self::run(repo_path, &["checkout", "-b", branch, "--track", &upstream]).map(|_| ())
    }

    /// Point an unborn HEAD at `branch` so the first commit lands there
    pub fn set_unborn_branch(repo_path: &Path, branch: &str) -> Result<()> {
        let reference = format!("refs/heads/{}", branch);
        Self::run(repo_path, &["symbolic-ref", "HEAD", &reference]).map(|_| ())
    }

    /// Pull `branch` from `remote` into the current branch
    pub fn pull(repo_path: &Path, remote: &str, branch: &str) -> Result<()> {
        Self::run(repo_path, &["pull", "--no-rebase", remote, branch]).map(|_| ())
    }

    /// Stage a path
    pub fn add(repo_path: &Path, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        Self::run(repo_path, &["add", "--", &path]).map(|_| ())
    }

    /// Check whether the index differs from HEAD
    pub fn has_staged_changes(repo_path: &Path) -> Result<bool> {
        let args = ["diff", "--cached", "--quiet"];
        let output = Self::output(repo_path, &args)?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(Self::failure(&args, &output)),
        }
    }

    /// Paths that differ between the index and HEAD
    pub fn staged_paths(repo_path: &Path) -> Result<Vec<PathBuf>> {
        let output = Self::run(repo_path, &["diff", "--cached", "--name-only", "-z"])?;
        Ok(output
            .split('\0')
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Commit staged changes and return the abbreviated commit id
    pub fn commit(repo_path: &Path, message: &str) -> Result<String> {
        Self::run(repo_path, &["commit", "--quiet", "-m", message])?;
        Self::run(repo_path, &["rev-parse", "--short", "HEAD"])
    }

    /// Push the current HEAD directly to `remote/branch`
    pub fn push(repo_path: &Path, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:{}", branch);
        Self::run(repo_path, &["push", remote, &refspec]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;
    use tempfile::TempDir;

    fn git(path: &Path, args: &[&str]) -> bool {
        StdCommand::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn init_git_repo(path: &Path) -> bool {
        git(path, &["init"])
            && git(path, &["config", "user.email", "test@test.com"])
            && git(path, &["config", "user.name", "Test"])
    }

    fn create_initial_commit(path: &Path) -> bool {
        std::fs::write(path.join("README.md"), "# Test").is_ok()
            && git(path, &["add", "."])
            && git(path, &["commit", "-m", "Initial commit"])
    }

    #[test]
    fn test_work_tree_root_outside_repo() {
        let temp = TempDir::new().unwrap();
        let err = GitOps::work_tree_root(temp.path()).unwrap_err();
        assert!(matches!(err, SyncError::NotARepository { .. }));
    }

    #[test]
    fn test_work_tree_root_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        let nested = temp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let root = GitOps::work_tree_root(&nested).unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_has_commits() {
        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        assert!(!GitOps::has_commits(temp.path()).unwrap());

        assert!(create_initial_commit(temp.path()));
        assert!(GitOps::has_commits(temp.path()).unwrap());
    }

    #[test]
    fn test_staged_changes() {
        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        assert!(create_initial_commit(temp.path()));
        assert!(!GitOps::has_staged_changes(temp.path()).unwrap());

        std::fs::write(temp.path().join("new.md"), "new").unwrap();
        GitOps::add(temp.path(), Path::new("new.md")).unwrap();
        assert!(GitOps::has_staged_changes(temp.path()).unwrap());

        let id = GitOps::commit(temp.path(), "Add new").unwrap();
        assert!(!id.is_empty());
        assert!(!GitOps::has_staged_changes(temp.path()).unwrap());
    }

    #[test]
    fn test_branch_switching() {
        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        GitOps::set_unborn_branch(temp.path(), "trunk").unwrap();
        assert!(create_initial_commit(temp.path()));
        assert_eq!(GitOps::current_branch(temp.path()).unwrap(), "trunk");

        assert!(!GitOps::local_branch_exists(temp.path(), "main").unwrap());
        GitOps::checkout_new(temp.path(), "main").unwrap();
        assert!(GitOps::local_branch_exists(temp.path(), "main").unwrap());

        GitOps::checkout(temp.path(), "trunk").unwrap();
        assert_eq!(GitOps::current_branch(temp.path()).unwrap(), "trunk");
    }

    #[test]
    fn test_remote_queries() {
        let remote = TempDir::new().unwrap();
        assert!(git(remote.path(), &["init", "--bare"]));

        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        assert!(!GitOps::has_remote(temp.path(), "origin").unwrap());

        let url = remote.path().to_string_lossy().to_string();
        assert!(git(temp.path(), &["remote", "add", "origin", &url]));
        assert!(GitOps::has_remote(temp.path(), "origin").unwrap());
        assert!(!GitOps::remote_has_branch(temp.path(), "origin", "main").unwrap());

        assert!(create_initial_commit(temp.path()));
        GitOps::push(temp.path(), "origin", "main").unwrap();
        assert!(GitOps::remote_has_branch(temp.path(), "origin", "main").unwrap());
    }

    #[test]
    fn test_remote_branch_needs_exact_name() {
        let remote = TempDir::new().unwrap();
        assert!(git(remote.path(), &["init", "--bare"]));

        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        let url = remote.path().to_string_lossy().to_string();
        assert!(git(temp.path(), &["remote", "add", "origin", &url]));
        assert!(create_initial_commit(temp.path()));
        assert!(git(temp.path(), &["push", "origin", "HEAD:refs/heads/feature/main"]));

        assert!(!GitOps::remote_has_branch(temp.path(), "origin", "main").unwrap());
        assert!(GitOps::remote_has_branch(temp.path(), "origin", "feature/main").unwrap());
    }

    #[test]
    fn test_staged_paths() {
        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));
        assert!(create_initial_commit(temp.path()));
        assert!(GitOps::staged_paths(temp.path()).unwrap().is_empty());

        std::fs::create_dir(temp.path().join("agents")).unwrap();
        std::fs::write(temp.path().join("agents/a.md"), "a").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "n").unwrap();
        GitOps::add(temp.path(), Path::new("agents")).unwrap();
        GitOps::add(temp.path(), Path::new("notes.txt")).unwrap();

        assert_eq!(
            GitOps::staged_paths(temp.path()).unwrap(),
            vec![PathBuf::from("agents/a.md"), PathBuf::from("notes.txt")]
        );
    }

    #[test]
    fn test_failed_command_reports_stderr() {
        let temp = TempDir::new().unwrap();
        assert!(init_git_repo(temp.path()));

        match GitOps::checkout(temp.path(), "does-not-exist") {
            Err(SyncError::Git { command, stderr }) => {
                assert_eq!(command, "checkout does-not-exist");
                assert!(!stderr.is_empty());
            }
            other => panic!("expected git error, got {:?}", other),
        }
    }
}
