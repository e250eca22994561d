//! Single-attempt HTTP transport
//!
//! [`Transport`] is the seam under the retry loop: one call, one attempt, no
//! retry policy. [`ReqwestTransport`] is the production implementation.

use std::time::Duration;

use academy_enrol_domain::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT_PREFIX};
use academy_enrol_domain::{HttpMethod, TransportError, WsResponse};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};
use url::Url;

use crate::errors::InfraError;

/// Response as received on the wire, before any interpretation.
pub type RawResponse = WsResponse;

/// Fully prepared outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// Form-urlencoded body fields; `None` for bodiless requests.
    pub form: Option<Vec<(String, String)>>,
}

impl OutboundRequest {
    pub fn get(url: Url) -> Self {
        Self { method: HttpMethod::Get, url, headers: Vec::new(), form: None }
    }

    pub fn post_form(url: Url, form: Vec<(String, String)>) -> Self {
        Self { method: HttpMethod::Post, url, headers: Vec::new(), form: Some(form) }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// One HTTP attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport with a per-attempt timeout.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Transport with the default timeout and user agent.
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] if the TLS backend cannot initialise.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await.map_err(InfraError::from)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let body = response.text().await.map_err(InfraError::from)?;

        Ok(RawResponse { status, headers, body })
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: format!("{USER_AGENT_PREFIX}/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ReqwestTransportBuilder {
    /// # Errors
    /// Returns [`TransportError::Build`] if the client cannot be constructed.
    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(InfraError::from)?;

        Ok(ReqwestTransport { client })
    }
}
