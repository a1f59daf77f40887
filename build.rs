// Build script - reads config.yaml at compile time and generates defaults
// This allows changing defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const SOURCE_SUBDIR: &str = "{source_subdir}";
pub const TARGET_DIR: &str = "{target_dir}";
pub const BRANCH: &str = "{branch}";
pub const REMOTE: &str = "{remote}";
pub const MISSING_REMOTE: &str = "{missing_remote}";
pub const PUSH: bool = {push};

pub const README_NAME: &str = "{readme_name}";
pub const README_TITLE: &str = "{readme_title}";
pub const INITIAL_COMMIT_MESSAGE: &str = "{initial_commit_message}";

pub const REPO_CONFIG_FILE: &str = "{config_file}";
"#,
        source_subdir = config.source_subdir,
        target_dir = config.target_dir,
        branch = config.branch,
        remote = config.remote,
        missing_remote = config.missing_remote,
        push = config.push,
        readme_name = config.readme_name,
        readme_title = config.readme_title,
        initial_commit_message = config.initial_commit_message,
        config_file = config.config_file,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    source_subdir: String,
    target_dir: String,
    branch: String,
    remote: String,
    missing_remote: String,
    push: bool,
    readme_name: String,
    readme_title: String,
    initial_commit_message: String,
    config_file: String,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            source_subdir: ".claude/agents".to_string(),
            target_dir: "agents".to_string(),
            branch: "main".to_string(),
            remote: "origin".to_string(),
            missing_remote: "skip".to_string(),
            push: true,
            readme_name: "README.md".to_string(),
            readme_title: "Agents".to_string(),
            initial_commit_message: "Initial commit".to_string(),
            config_file: "agent-sync.yaml".to_string(),
        }
    }
}

#[derive(PartialEq)]
enum Section {
    None,
    Sync,
    Bootstrap,
    Repository,
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut section = Section::None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Top-level keys open a section
        if !line.starts_with(' ') && !line.starts_with('\t') {
            section = match trimmed {
                "sync:" => Section::Sync,
                "bootstrap:" => Section::Bootstrap,
                "repository:" => Section::Repository,
                _ => Section::None,
            };
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };

        match (&section, key) {
            (Section::Sync, "source_subdir") => config.source_subdir = value.to_string(),
            (Section::Sync, "target_dir") => config.target_dir = value.to_string(),
            (Section::Sync, "branch") => config.branch = value.to_string(),
            (Section::Sync, "remote") => config.remote = value.to_string(),
            (Section::Sync, "missing_remote") => config.missing_remote = value.to_string(),
            (Section::Sync, "push") => config.push = parse_bool(value),
            (Section::Bootstrap, "readme_name") => config.readme_name = value.to_string(),
            (Section::Bootstrap, "readme_title") => config.readme_title = value.to_string(),
            (Section::Bootstrap, "initial_commit_message") => {
                config.initial_commit_message = value.to_string()
            }
            (Section::Repository, "config_file") => config.config_file = value.to_string(),
            _ => {}
        }
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    // Skip comments and empty lines
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    let value = value.trim_matches('"').trim_matches('\'');
    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "1")
}
