//! Size-capped diagnostic log file
//!
//! Records are appended as
//!
//! ```text
//! === label ===
//! payload
//!
//! ```
//!
//! When the file exceeds the configured size it is renamed to `<path>.1`
//! (replacing any earlier backup) and a fresh file is started. Only one
//! backup generation is kept.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use academy_enrol_core::DiagnosticLog;
use academy_enrol_domain::constants::LOG_BACKUP_SUFFIX;
use academy_enrol_domain::{LogPayload, LoggingConfig};
use tracing::warn;

/// File-backed [`DiagnosticLog`] with single-generation rotation.
///
/// Write failures never reach the caller; they are reported through
/// `tracing` and the record is dropped.
#[derive(Debug, Clone)]
pub struct RotatingLog {
    settings: LoggingConfig,
}

impl RotatingLog {
    pub fn new(settings: LoggingConfig) -> Self {
        Self { settings }
    }

    pub fn path(&self) -> &Path {
        &self.settings.path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut backup = self.settings.path.clone().into_os_string();
        backup.push(LOG_BACKUP_SUFFIX);
        PathBuf::from(backup)
    }

    /// Delete the current log file.
    ///
    /// Returns `false` when there was no file to delete.
    ///
    /// # Errors
    /// Propagates any I/O error other than the file being absent.
    pub fn clear(&self) -> io::Result<bool> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn append(&self, record: &str) -> io::Result<()> {
        // A failed rotation keeps appending to the oversized file.
        if let Err(err) = self.rotate_if_oversized() {
            warn!(path = %self.path().display(), error = %err, "failed to rotate diagnostic log");
        }
        let mut file = OpenOptions::new().create(true).append(true).open(self.path())?;
        file.write_all(record.as_bytes())
    }

    // Not locked across processes: two writers may both rotate.
    fn rotate_if_oversized(&self) -> io::Result<()> {
        match fs::metadata(self.path()) {
            Ok(meta) if meta.len() > self.settings.max_bytes => {
                fs::rename(self.path(), self.backup_path())
            }
            Ok(_) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

impl DiagnosticLog for RotatingLog {
    fn record(&self, label: &str, payload: LogPayload) {
        if !self.settings.enabled {
            return;
        }

        if let Err(err) = self.append(&format_record(label, &payload)) {
            warn!(path = %self.path().display(), error = %err, label, "failed to write diagnostic log record");
        }
    }
}

/// Render one record, trailing blank line included.
pub fn format_record(label: &str, payload: &LogPayload) -> String {
    format!("=== {label} ===\n{}\n\n", payload.render())
}
