use std::time::Duration;

use academy_enrol_core::DiagnosticLog;
use academy_enrol_domain::{LogPayload, RetryBudget, TransportError};
use tracing::debug;

use super::transport::{OutboundRequest, RawResponse, ReqwestTransport, Transport};

/// HTTP client with bounded retries and a fixed backoff.
///
/// Every attempt is written to the diagnostic log: the URL and form fields
/// before sending, then either status/headers/body or the transport error.
#[derive(Clone)]
pub struct RetryingHttpClient<T = ReqwestTransport> {
    transport: T,
}

impl RetryingHttpClient<ReqwestTransport> {
    /// Client over the default [`ReqwestTransport`].
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] if the transport cannot be built.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Ok(Self::new(ReqwestTransport::new()?))
    }
}

impl<T: Transport> RetryingHttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send `request`, retrying per `budget`.
    ///
    /// Status 5xx and 429 are retried; any other status is returned as is.
    /// On the final attempt the response or error is returned whatever it is.
    ///
    /// # Errors
    /// Returns the last [`TransportError`] once every attempt failed to
    /// produce a response.
    pub async fn send(
        &self,
        request: &OutboundRequest,
        budget: RetryBudget,
        label: &str,
        log: &dyn DiagnosticLog,
    ) -> Result<RawResponse, TransportError> {
        let attempts = budget.total_attempts();

        for attempt in 1..=attempts {
            let prefix = format!("{label} try {attempt}");
            log.record(&format!("{prefix} URL"), LogPayload::Text(request.url.to_string()));
            if let Some(form) = &request.form {
                log.record(&format!("{prefix} ARGS"), LogPayload::fields(form.iter().cloned()));
            }

            debug!(attempt, method = %request.method, function = label, "sending HTTP request");

            match self.transport.execute(request).await {
                Ok(response) => {
                    log.record(&format!("{prefix} CODE"), LogPayload::Text(response.status.to_string()));
                    log.record(
                        &format!("{prefix} HEADERS"),
                        LogPayload::fields(response.headers.iter().cloned()),
                    );
                    log.record(&format!("{prefix} BODY"), LogPayload::Text(response.body.clone()));
                    debug!(attempt, status = response.status, function = label, "received HTTP response");

                    if is_retryable_status(response.status) && attempt < attempts {
                        sleep_with_backoff(budget.backoff).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    log.record(&format!("{prefix} ERROR"), LogPayload::Text(err.to_string()));
                    debug!(attempt, function = label, error = %err, "HTTP request failed");

                    if attempt < attempts && should_retry_error(&err) {
                        sleep_with_backoff(budget.backoff).await;
                        continue;
                    }

                    return Err(err);
                }
            }
        }

        Err(TransportError::Request("http client exhausted retries without producing a result".into()))
    }
}

/// Server errors and rate limiting.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

fn should_retry_error(err: &TransportError) -> bool {
    !matches!(err, TransportError::Build(_))
}

async fn sleep_with_backoff(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Default)]
    struct LabelLog(Mutex<Vec<String>>);

    impl LabelLog {
        fn labels(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl DiagnosticLog for LabelLog {
        fn record(&self, label: &str, _payload: LogPayload) {
            self.0.lock().unwrap().push(label.to_string());
        }
    }

    /// Transport failing every attempt while counting them.
    #[derive(Default)]
    struct DownTransport {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Transport for DownTransport {
        async fn execute(&self, _request: &OutboundRequest) -> Result<RawResponse, TransportError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Connection("connection refused".into()))
        }
    }

    fn budget(max_retries: u32) -> RetryBudget {
        RetryBudget::new(max_retries, Duration::from_millis(5))
    }

    fn client() -> RetryingHttpClient {
        RetryingHttpClient::with_defaults().expect("http client")
    }

    fn form_request(server: &MockServer) -> OutboundRequest {
        OutboundRequest::post_form(
            Url::parse(&server.uri()).unwrap(),
            vec![("field".into(), "email".into())],
        )
    }

    #[tokio::test]
    async fn returns_successful_response_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let log = LabelLog::default();
        let response =
            client().send(&form_request(&server), budget(2), "fn", &log).await.expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(
            log.labels(),
            vec!["fn try 1 URL", "fn try 1 ARGS", "fn try 1 CODE", "fn try 1 HEADERS", "fn try 1 BODY"]
        );
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("POST"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200).set_body_string(r#"[{"id":7}]"#)
                }
            })
            .expect(2)
            .mount(&server)
            .await;

        let log = LabelLog::default();
        let response =
            client().send(&form_request(&server), budget(2), "fn", &log).await.expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
        let labels = log.labels();
        assert!(labels.contains(&"fn try 2 URL".to_string()));
        assert!(labels.contains(&"fn try 2 ARGS".to_string()));
    }

    #[tokio::test]
    async fn retries_rate_limiting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(3)
            .mount(&server)
            .await;

        let response = client()
            .send(&form_request(&server), budget(2), "fn", &LabelLog::default())
            .await
            .expect("response");

        // Exhausted budget hands back the last response.
        assert_eq!(response.status, 429);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let response = client()
            .send(&form_request(&server), budget(2), "fn", &LabelLog::default())
            .await
            .expect("response");

        assert_eq!(response.status, 404);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn persistent_transport_failure_uses_whole_budget() {
        for max_retries in [0, 1, 3] {
            let client = RetryingHttpClient::new(DownTransport::default());
            let request = OutboundRequest::get(Url::parse("https://lms.example.com/").unwrap());
            let log = LabelLog::default();

            let result = client.send(&request, budget(max_retries), "fn", &log).await;

            assert!(matches!(result, Err(TransportError::Connection(_))));
            let expected = max_retries as usize + 1;
            assert_eq!(client.transport.attempts.load(Ordering::SeqCst), expected);
            let errors = log.labels().iter().filter(|label| label.ends_with("ERROR")).count();
            assert_eq!(errors, expected);
        }
    }

    #[tokio::test]
    async fn get_requests_log_no_args() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let log = LabelLog::default();
        let request = OutboundRequest::get(Url::parse(&server.uri()).unwrap());
        client().send(&request, RetryBudget::single_attempt(), "probe", &log).await.expect("response");

        assert!(!log.labels().iter().any(|label| label.ends_with("ARGS")));
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(429));
        assert!(!is_retryable_status(200));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(400));
    }
}
