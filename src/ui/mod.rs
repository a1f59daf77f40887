// UI module
// Console reporting for sync progress, outcomes, and diagnostics

pub mod styles;

use std::io::IsTerminal;

use crossterm::style::ContentStyle;

use crate::core::{EventSink, SyncEvent, SyncSettings};
use crate::error::SyncError;
use crate::operations::{PushOutcome, SyncOutcome};

pub use styles::Styles;

/// Disable ANSI colors when stdout is not a terminal
pub fn init_colors() {
    if !std::io::stdout().is_terminal() {
        crossterm::style::force_color_output(false);
    }
}

/// Prints sync events to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Step(message) => {
                println!("{} {}", Styles::step().apply("==>"), message);
            }
            SyncEvent::Copied(file) => {
                println!(
                    "{}",
                    Styles::copied().apply(format!(
                        "'{}' -> '{}'",
                        file.from.display(),
                        file.to.display()
                    ))
                );
            }
            SyncEvent::WouldCopy(path) => {
                println!("would copy {}", path.display());
            }
            SyncEvent::Skipped(path) => {
                println!(
                    "{} skipping {} (not a file)",
                    Styles::warning().apply("warning:"),
                    path.display()
                );
            }
            SyncEvent::Note(message) => {
                println!("{}", Styles::note().apply(message));
            }
        }
    }
}

/// Print the final line for a successful run
pub fn report_outcome(outcome: &SyncOutcome, settings: &SyncSettings) {
    match outcome {
        SyncOutcome::DryRun { files } => {
            println!(
                "{}",
                Styles::note().apply(format!("Dry run: {} files would be copied", files))
            );
        }
        SyncOutcome::UpToDate => {
            println!(
                "{}",
                Styles::success().apply(format!(
                    "{} is already up to date",
                    settings.target_dir.display()
                ))
            );
        }
        SyncOutcome::Published { files, commit, push } => {
            println!(
                "{}",
                Styles::success().apply(format!("Committed {} ({} files synced)", commit, files))
            );
            match push {
                PushOutcome::Pushed { remote, branch } => println!(
                    "{}",
                    Styles::success().apply(format!("Pushed to {}/{}", remote, branch))
                ),
                PushOutcome::SkippedNoRemote { remote } => println!(
                    "{}",
                    Styles::note().apply(format!(
                        "No remote '{}' configured; commit kept local",
                        remote
                    ))
                ),
                PushOutcome::Disabled => println!(
                    "{}",
                    Styles::note().apply("Push disabled; commit kept local")
                ),
            }
        }
    }
}

/// Print a fatal diagnostic to stderr
pub fn report_error(error: &SyncError) {
    let (label, style) = error_label(error);
    eprintln!("{} {}", style.apply(label), error);

    if error.is_precondition() {
        eprintln!("{}", Styles::hint().apply("nothing was changed"));
    }
    if let Some(hint) = hint_for(error) {
        eprintln!("{}", Styles::hint().apply(format!("hint: {}", hint)));
    }
}

/// Precondition failures get their own prefix and color
fn error_label(error: &SyncError) -> (&'static str, ContentStyle) {
    if error.is_precondition() {
        ("precondition failed:", Styles::precondition())
    } else {
        ("error:", Styles::error())
    }
}

fn hint_for(error: &SyncError) -> Option<&'static str> {
    match error {
        SyncError::NotARepository { .. } => {
            Some("run agent-sync from inside the repository that tracks the agent files")
        }
        SyncError::SourceMissing { .. } => {
            Some("create the source directory or pass --source <dir>")
        }
        SyncError::NoRemote { .. } => {
            Some("add a remote with `git remote add`, or set missing_remote: skip")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_precondition_errors_have_hints() {
        let err = SyncError::SourceMissing {
            path: PathBuf::from("/home/user/.claude/agents"),
        };
        assert!(hint_for(&err).is_some());

        let err = SyncError::Git {
            command: "push origin HEAD:main".to_string(),
            stderr: "rejected".to_string(),
        };
        assert!(hint_for(&err).is_none());
    }

    #[test]
    fn test_precondition_errors_are_labelled_apart() {
        let precondition = SyncError::NotARepository {
            path: PathBuf::from("/tmp/elsewhere"),
        };
        let operational = SyncError::NoRemote {
            remote: "origin".to_string(),
        };

        let (label, style) = error_label(&precondition);
        assert_eq!(label, "precondition failed:");
        assert_eq!(style, Styles::precondition());

        let (label, style) = error_label(&operational);
        assert_eq!(label, "error:");
        assert_eq!(style, Styles::error());
        assert_ne!(Styles::precondition(), Styles::error());
    }
}
