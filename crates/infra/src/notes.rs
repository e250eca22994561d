//! Order annotations for hosts without an order store

use std::sync::Arc;

use academy_enrol_core::{DiagnosticLog, OrderAnnotator};
use academy_enrol_domain::{LogPayload, OrderRef, Result};
use async_trait::async_trait;
use tracing::info;

/// [`OrderAnnotator`] that writes each note to the diagnostic log and emits
/// it as a `tracing` event.
pub struct LoggedOrderNotes {
    log: Arc<dyn DiagnosticLog>,
}

impl LoggedOrderNotes {
    pub fn new(log: Arc<dyn DiagnosticLog>) -> Self {
        Self { log }
    }
}

#[async_trait]
impl OrderAnnotator for LoggedOrderNotes {
    async fn annotate(&self, order: &OrderRef, note: &str) -> Result<()> {
        self.log.record(&format!("order {order} note"), LogPayload::from(note));
        info!(order = %order, note, "order annotated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use academy_enrol_domain::LoggingConfig;
    use tempfile::TempDir;

    use super::*;
    use crate::logging::RotatingLog;

    #[tokio::test]
    async fn note_lands_in_diagnostic_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("moodle-debug.log");
        let log = Arc::new(RotatingLog::new(LoggingConfig {
            path: path.clone(),
            ..LoggingConfig::default()
        }));

        LoggedOrderNotes::new(log)
            .annotate(&OrderRef::new("1001"), "Moodle enrolment SUCCESS.")
            .await
            .unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "=== order 1001 note ===\nMoodle enrolment SUCCESS.\n\n");
    }
}
