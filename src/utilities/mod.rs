// Utilities module
// Helper functions and tools

pub mod paths;

pub use paths::{display_with_home, expand_home, home_dir, normalize_path, resolve_path};
