//! Port interfaces for the enrolment flow
//!
//! These traits define the boundaries between the orchestration logic and the
//! infrastructure that talks to the remote site, writes the diagnostic log and
//! annotates orders.

use academy_enrol_domain::{
    EnrolmentConfig, LogPayload, OrderRef, Result, TransportError, WsRequest, WsResponse,
};
use async_trait::async_trait;

/// Executes web service calls against the configured site.
///
/// Implementations own retries (bounded by `request.retry`), timeouts and the
/// per-attempt diagnostic logging. Any HTTP status is returned as a response;
/// only a failure to obtain one is an error.
#[async_trait]
pub trait WebServiceGateway: Send + Sync {
    async fn call(
        &self,
        config: &EnrolmentConfig,
        request: &WsRequest,
        log: &dyn DiagnosticLog,
    ) -> std::result::Result<WsResponse, TransportError>;
}

/// Append-only operator log of remote exchanges.
///
/// Recording never fails from the caller's point of view.
pub trait DiagnosticLog: Send + Sync {
    fn record(&self, label: &str, payload: LogPayload);
}

/// Log that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl DiagnosticLog for NullLog {
    fn record(&self, _label: &str, _payload: LogPayload) {}
}

/// Appends human-readable notes to the originating order.
#[async_trait]
pub trait OrderAnnotator: Send + Sync {
    async fn annotate(&self, order: &OrderRef, note: &str) -> Result<()>;
}
