//! Connection test against the configured site

use std::time::Instant;

use academy_enrol_core::enrolment::body_reports_exception;
use academy_enrol_domain::TransportError;
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Summary of a site-info probe. The full exchange is in the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInfoReport {
    pub status: u16,
    pub site_name: Option<String>,
    pub release: Option<String>,
    /// The body reported a web service exception (bad token, disabled
    /// function, ...).
    pub remote_exception: bool,
}

impl SiteInfoReport {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status) && !self.remote_exception
    }
}

/// Probe the site once, without retries.
///
/// # Errors
/// Returns the [`TransportError`] when no response came back.
pub async fn site_info(context: &AppContext) -> Result<SiteInfoReport, TransportError> {
    let started = Instant::now();

    let result = context.site_info.probe(&context.config, context.log.as_ref()).await;
    let report = result.map(|response| {
        let parsed: Option<serde_json::Value> = serde_json::from_str(&response.body).ok();
        let field = |name: &str| {
            parsed.as_ref().and_then(|v| v.get(name)).and_then(|v| v.as_str()).map(str::to_string)
        };
        SiteInfoReport {
            status: response.status,
            site_name: field("sitename"),
            release: field("release"),
            remote_exception: body_reports_exception(&response.body),
        }
    });

    log_command_execution(
        "site_info",
        started.elapsed(),
        report.as_ref().is_ok_and(SiteInfoReport::is_ok),
    );
    report
}
