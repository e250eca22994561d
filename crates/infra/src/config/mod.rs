//! Configuration loading
//!
//! This module loads the enrolment settings from environment variables and
//! files.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, load_with_override, probe_config_paths};
