// Sync Procedure
// Copies the source directory into the tracked directory, commits, and publishes to main

use std::fs;
use std::path::Path;

use crate::core::{EventSink, MissingRemotePolicy, SyncEvent, SyncSettings};
use crate::error::{Result, SyncError};

use super::copy::{CopyEngine, SourceListing};
use super::git::GitOps;

/// What happened to the commit after it was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Pushed to `remote/branch`
    Pushed { remote: String, branch: String },
    /// No remote configured; the commit stays local
    SkippedNoRemote { remote: String },
    /// Pushing was turned off for this run
    Disabled,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Dry run; lists the files that would be copied
    DryRun { files: usize },
    /// Tracked directory already matches the last commit
    UpToDate,
    /// A sync commit was created
    Published {
        /// Direct entries counted in the source directory
        files: usize,
        /// Abbreviated commit id
        commit: String,
        push: PushOutcome,
    },
}

/// Commit message for a sync of `count` source entries
pub fn commit_message(settings: &SyncSettings, count: usize) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!(
        "Sync agent definitions from {source}\n\
         \n\
         Synced {count} agent {noun} into {target}/.\n\
         \n\
         Agent definitions are authored outside this repository and copied here\n\
         verbatim by agent-sync.\n\
         \n\
         Synced-by: agent-sync {version}\n",
        source = settings.source_display,
        count = count,
        noun = noun,
        target = settings.target_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Runs one sync from start to finish, stopping at the first failure
pub struct SyncProcedure<'a, S: EventSink> {
    settings: &'a SyncSettings,
    sink: S,
}

impl<'a, S: EventSink> SyncProcedure<'a, S> {
    pub fn new(settings: &'a SyncSettings, sink: S) -> Self {
        Self { settings, sink }
    }

    /// Give back the event sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn run(&mut self) -> Result<SyncOutcome> {
        let settings = self.settings;
        self.check_preconditions()?;

        let listing = SourceListing::read(&settings.source_dir)?;

        if settings.dry_run {
            return Ok(self.dry_run(&listing));
        }

        let has_remote = GitOps::has_remote(&settings.work_tree, &settings.remote)?;
        self.prepare_history(has_remote)?;

        self.copy(&listing)?;

        self.step("Staging changes");
        // git rejects a pathspec that matches nothing, e.g. an empty target
        if fs::read_dir(settings.target_path())?.next().is_some() {
            GitOps::add(&settings.work_tree, &settings.target_dir)?;
        }
        if !GitOps::has_staged_changes(&settings.work_tree)? {
            tracing::info!("no staged changes; nothing to commit");
            return Ok(SyncOutcome::UpToDate);
        }
        self.warn_foreign_staged()?;

        let files = listing.entry_count();
        self.step(&format!("Committing {} synced entries", files));
        let commit = GitOps::commit(&settings.work_tree, &commit_message(settings, files))?;
        tracing::info!(commit = %commit, files, "created sync commit");

        let push = self.publish(has_remote)?;

        Ok(SyncOutcome::Published {
            files,
            commit,
            push,
        })
    }

    /// Fatal checks made before anything is touched
    fn check_preconditions(&mut self) -> Result<()> {
        GitOps::work_tree_root(&self.settings.work_tree)?;

        if !self.settings.source_dir.is_dir() {
            return Err(SyncError::SourceMissing {
                path: self.settings.source_dir.clone(),
            });
        }

        Ok(())
    }

    fn dry_run(&mut self, listing: &SourceListing) -> SyncOutcome {
        self.step("Dry run; nothing will be changed");
        let target = self.settings.target_path();

        for entry in listing.files() {
            self.sink.emit(SyncEvent::WouldCopy(target.join(&entry.name)));
        }
        self.report_skipped(listing);

        SyncOutcome::DryRun {
            files: listing.files().count(),
        }
    }

    /// Switch to the main branch and pull, or create the baseline commit
    fn prepare_history(&mut self, has_remote: bool) -> Result<()> {
        let settings = self.settings;
        let repo = &settings.work_tree;
        let branch = settings.branch.as_str();
        let remote = settings.remote.as_str();

        if !GitOps::has_commits(repo)? {
            return self.bootstrap();
        }

        let remote_has_branch = has_remote && GitOps::remote_has_branch(repo, remote, branch)?;

        self.step(&format!("Switching to {}", branch));
        if GitOps::local_branch_exists(repo, branch)? {
            if GitOps::current_branch(repo)? != branch {
                GitOps::checkout(repo, branch)?;
            }
        } else if remote_has_branch {
            GitOps::checkout_tracking(repo, remote, branch)?;
        } else {
            GitOps::checkout_new(repo, branch)?;
        }

        if remote_has_branch {
            self.step(&format!("Pulling {}/{}", remote, branch));
            GitOps::pull(repo, remote, branch)?;
        } else if has_remote {
            self.note(format!(
                "{}/{} does not exist yet; it will be created on push",
                remote, branch
            ));
        } else {
            tracing::info!(remote, "no remote configured; working locally");
        }

        Ok(())
    }

    /// Baseline commit for a repository with no history
    fn bootstrap(&mut self) -> Result<()> {
        let settings = self.settings;
        let repo = &settings.work_tree;
        let bootstrap = &settings.bootstrap;

        self.step("Creating initial commit");
        GitOps::set_unborn_branch(repo, &settings.branch)?;

        let readme = repo.join(&bootstrap.readme_name);
        if !readme.exists() {
            fs::write(&readme, bootstrap.readme_contents())?;
        }

        GitOps::add(repo, Path::new(&bootstrap.readme_name))?;
        let commit = GitOps::commit(repo, &bootstrap.initial_commit_message)?;
        tracing::info!(commit = %commit, "created baseline commit");

        Ok(())
    }

    fn copy(&mut self, listing: &SourceListing) -> Result<()> {
        let settings = self.settings;
        let target = settings.target_path();
        self.step(&format!(
            "Copying {} into {}",
            settings.source_display,
            settings.target_dir.display()
        ));

        let sink = &mut self.sink;
        let copied = CopyEngine::new(&target)
            .copy_all(listing, |file| sink.emit(SyncEvent::Copied(file.clone())))?;
        tracing::info!(copied = copied.len(), target = %target.display(), "copied source files");

        self.report_skipped(listing);
        Ok(())
    }

    fn publish(&mut self, has_remote: bool) -> Result<PushOutcome> {
        let remote = self.settings.remote.clone();
        let branch = self.settings.branch.clone();

        if !self.settings.push {
            return Ok(PushOutcome::Disabled);
        }

        if !has_remote {
            return match self.settings.missing_remote {
                MissingRemotePolicy::Skip => Ok(PushOutcome::SkippedNoRemote { remote }),
                MissingRemotePolicy::Fail => Err(SyncError::NoRemote { remote }),
            };
        }

        self.step(&format!("Pushing to {}/{}", remote, branch));
        GitOps::push(&self.settings.work_tree, &remote, &branch)?;

        Ok(PushOutcome::Pushed { remote, branch })
    }

    /// The commit takes the whole index; flag staged paths outside the target
    fn warn_foreign_staged(&mut self) -> Result<()> {
        let settings = self.settings;
        let foreign: Vec<_> = GitOps::staged_paths(&settings.work_tree)?
            .into_iter()
            .filter(|p| !p.starts_with(&settings.target_dir))
            .collect();

        if !foreign.is_empty() {
            let list = foreign
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(paths = %list, "staged changes outside the tracked directory");
            self.note(format!(
                "also committing staged changes outside {}: {}",
                settings.target_dir.display(),
                list
            ));
        }

        Ok(())
    }

    fn report_skipped(&mut self, listing: &SourceListing) {
        for entry in listing.skipped() {
            tracing::warn!(path = %entry.path.display(), "skipping non-file source entry");
            self.sink.emit(SyncEvent::Skipped(entry.path.clone()));
        }
    }

    fn step(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.sink.emit(SyncEvent::Step(message.to_string()));
    }

    fn note(&mut self, message: String) {
        self.sink.emit(SyncEvent::Note(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BootstrapSettings;
    use std::path::PathBuf;

    fn settings(source_display: &str, target_dir: &str) -> SyncSettings {
        SyncSettings {
            work_tree: PathBuf::from("/repo"),
            source_dir: PathBuf::from("/home/user/.claude/agents"),
            source_display: source_display.to_string(),
            target_dir: PathBuf::from(target_dir),
            branch: "main".to_string(),
            remote: "origin".to_string(),
            missing_remote: MissingRemotePolicy::Skip,
            push: true,
            dry_run: false,
            bootstrap: BootstrapSettings::default(),
        }
    }

    #[test]
    fn test_commit_message_template() {
        let message = commit_message(&settings("~/.claude/agents", "agents"), 3);
        let mut lines = message.lines();

        assert_eq!(lines.next(), Some("Sync agent definitions from ~/.claude/agents"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("Synced 3 agent files into agents/."));
        assert!(message.contains("verbatim by agent-sync."));
        assert!(message
            .lines()
            .last()
            .unwrap()
            .starts_with("Synced-by: agent-sync "));
    }

    #[test]
    fn test_commit_message_singular() {
        let message = commit_message(&settings("/srv/agents", "defs"), 1);
        assert!(message.contains("Synced 1 agent file into defs/."));
    }
}
