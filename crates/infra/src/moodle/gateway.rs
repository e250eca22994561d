//! Moodle REST web service gateway
//!
//! Every call targets
//! `<domain>/webservice/rest/server.php?wstoken=..&wsfunction=..&moodlewsrestformat=json`.
//! The token only ever travels as the `wstoken` query parameter. POST calls
//! carry their parameters as a form body; GET calls append them to the query.

use academy_enrol_core::{DiagnosticLog, WebServiceGateway};
use academy_enrol_domain::constants::{REST_ENDPOINT_PATH, REST_FORMAT};
use academy_enrol_domain::{EnrolmentConfig, HttpMethod, TransportError, WsRequest, WsResponse};
use async_trait::async_trait;
use url::Url;

use crate::http::{OutboundRequest, ReqwestTransport, RetryingHttpClient, Transport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// [`WebServiceGateway`] speaking the Moodle REST protocol.
pub struct MoodleRestGateway<T = ReqwestTransport> {
    client: RetryingHttpClient<T>,
}

impl MoodleRestGateway<ReqwestTransport> {
    /// Gateway over a default `reqwest` transport.
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Ok(Self::new(RetryingHttpClient::with_defaults()?))
    }
}

impl<T: Transport> MoodleRestGateway<T> {
    pub fn new(client: RetryingHttpClient<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: Transport + 'static> WebServiceGateway for MoodleRestGateway<T> {
    async fn call(
        &self,
        config: &EnrolmentConfig,
        request: &WsRequest,
        log: &dyn DiagnosticLog,
    ) -> Result<WsResponse, TransportError> {
        let outbound = build_outbound(config, request)?;
        self.client.send(&outbound, request.retry, request.function.as_str(), log).await
    }
}

/// Endpoint URL carrying the token, function name and response format.
///
/// # Errors
/// Returns [`TransportError::Build`] when the configured domain is not an
/// absolute URL.
pub fn endpoint_url(config: &EnrolmentConfig, request: &WsRequest) -> Result<Url, TransportError> {
    let base = format!("{}{REST_ENDPOINT_PATH}", config.base_domain.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .map_err(|err| TransportError::Build(format!("invalid site domain: {err}")))?;

    url.query_pairs_mut()
        .append_pair("wstoken", &config.api_token)
        .append_pair("wsfunction", request.function.as_str())
        .append_pair("moodlewsrestformat", REST_FORMAT);

    Ok(url)
}

/// Turn a web service call into a ready-to-send HTTP request.
///
/// # Errors
/// See [`endpoint_url`].
pub fn build_outbound(
    config: &EnrolmentConfig,
    request: &WsRequest,
) -> Result<OutboundRequest, TransportError> {
    let mut url = endpoint_url(config, request)?;

    let outbound = match request.method {
        HttpMethod::Get => {
            if !request.params.is_empty() {
                url.query_pairs_mut().extend_pairs(request.params.iter());
            }
            OutboundRequest::get(url)
        }
        HttpMethod::Post => OutboundRequest::post_form(url, request.params.clone())
            .header("Content-Type", FORM_CONTENT_TYPE),
    };

    let outbound = outbound.header("Accept", JSON_ACCEPT);
    Ok(match config.site_url.as_deref() {
        Some(site) => outbound.header("Referer", site),
        None => outbound,
    })
}
