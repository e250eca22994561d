//! Process-level logging helpers.

use std::time::Duration;

use academy_enrol_domain::AcademyError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Logs go to stderr so
/// command output on stdout stays machine-readable.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    // A subscriber may already be set (tests); keep the existing one.
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` should be a stable identifier without sensitive data.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert an `AcademyError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &AcademyError) -> &'static str {
    match error {
        AcademyError::Config(_) => "config",
        AcademyError::Io(_) => "io",
        AcademyError::Network(_) => "network",
        AcademyError::NotFound(_) => "not_found",
        AcademyError::InvalidInput(_) => "invalid_input",
        AcademyError::Internal(_) => "internal",
    }
}
