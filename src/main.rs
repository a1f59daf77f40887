// Agent Sync
// Copies agent definition files into this repository and pushes them to main

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use agent_sync::core::{MissingRemotePolicy, Overrides, SyncSettings};
use agent_sync::ui::{self, ConsoleSink};
use agent_sync::{logging, SyncError, SyncProcedure};

/// Policy names accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissingRemoteArg {
    Skip,
    Fail,
}

impl From<MissingRemoteArg> for MissingRemotePolicy {
    fn from(arg: MissingRemoteArg) -> Self {
        match arg {
            MissingRemoteArg::Skip => MissingRemotePolicy::Skip,
            MissingRemoteArg::Fail => MissingRemotePolicy::Fail,
        }
    }
}

/// Sync agent definition files into this repository and publish them to main
#[derive(Parser, Debug)]
#[command(name = "agent-sync", version)]
#[command(about = "Copy agent definition files into the repository and push them to main")]
struct Cli {
    /// Source directory (default: ~/.claude/agents)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Tracked directory, relative to the repository root
    #[arg(long)]
    target_dir: Option<String>,

    /// Branch that receives the sync commit
    #[arg(long)]
    branch: Option<String>,

    /// Remote to pull from and push to
    #[arg(long)]
    remote: Option<String>,

    /// What to do when the remote is not configured
    #[arg(long, value_enum)]
    missing_remote: Option<MissingRemoteArg>,

    /// Repository config file (default: agent-sync.yaml at the repository root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to run in (default: current directory)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// List what would be copied and stop
    #[arg(long)]
    dry_run: bool,

    /// Commit locally without pushing
    #[arg(long)]
    no_push: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Shortcut for --log-level debug
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            source: self.source.clone(),
            target_dir: self.target_dir.clone(),
            branch: self.branch.clone(),
            remote: self.remote.clone(),
            missing_remote: self.missing_remote.map(Into::into),
            config: self.config.clone(),
            dry_run: self.dry_run,
            no_push: self.no_push,
        }
    }
}

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> ExitCode {
    let cli = Cli::parse();
    ui::init_colors();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SyncError> {
    let level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    logging::init_logging(level)?;

    let work_dir = match &cli.work_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let settings = SyncSettings::resolve(&work_dir, &cli.overrides())?;
    tracing::debug!(?settings, "resolved settings");

    let mut procedure = SyncProcedure::new(&settings, ConsoleSink);
    let outcome = procedure.run()?;

    ui::report_outcome(&outcome, &settings);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_default_run() {
        let cli = Cli::try_parse_from(["agent-sync"]).unwrap();
        let overrides = cli.overrides();
        assert!(overrides.source.is_none());
        assert!(overrides.branch.is_none());
        assert!(!overrides.dry_run);
        assert!(!overrides.no_push);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_flags_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "agent-sync",
            "--source",
            "/tmp/agents",
            "--missing-remote",
            "fail",
            "--dry-run",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.source, Some(PathBuf::from("/tmp/agents")));
        assert_eq!(overrides.missing_remote, Some(MissingRemotePolicy::Fail));
        assert!(overrides.dry_run);
    }
}
