//! Site-info probe
//!
//! Independent of the enrolment flow: one unretried GET of
//! `core_webservice_get_site_info` so an operator can check the domain and
//! token by reading the diagnostic log.

use std::sync::Arc;

use academy_enrol_domain::{EnrolmentConfig, TransportError, WsFunction, WsRequest, WsResponse};
use tracing::info;

use crate::enrolment::ports::{DiagnosticLog, WebServiceGateway};

pub struct SiteInfoProbe {
    gateway: Arc<dyn WebServiceGateway>,
}

impl SiteInfoProbe {
    pub fn new(gateway: Arc<dyn WebServiceGateway>) -> Self {
        Self { gateway }
    }

    /// Issue the probe. The full exchange is written to `log` by the gateway.
    ///
    /// # Errors
    /// Returns the [`TransportError`] when no response was obtained.
    pub async fn probe(
        &self,
        config: &EnrolmentConfig,
        log: &dyn DiagnosticLog,
    ) -> Result<WsResponse, TransportError> {
        let request = WsRequest::get(WsFunction::GetSiteInfo);
        let response = self.gateway.call(config, &request, log).await?;
        info!(status = response.status, "site info probe completed");
        Ok(response)
    }
}
