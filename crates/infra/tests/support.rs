//! Shared helpers for infra integration tests: a wiremock-backed Moodle site
//! and an enrolment service wired to the real gateway and log file.

use std::sync::{Arc, Mutex};

use academy_enrol_core::{EnrolmentService, OrderAnnotator};
use academy_enrol_domain::{EnrolmentConfig, LoggingConfig, OrderRef, Result};
use academy_enrol_infra::{MoodleRestGateway, RotatingLog};
use async_trait::async_trait;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "s3cr3tToken";
pub const COURSE_ID: u64 = 11;
pub const ENDPOINT: &str = "/webservice/rest/server.php";

/// Fake Moodle site plus a temp directory holding the diagnostic log.
pub struct TestSite {
    pub server: MockServer,
    pub config: EnrolmentConfig,
    _dir: TempDir,
}

impl TestSite {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("temp dir should be created");
        let mut config = EnrolmentConfig::new(server.uri(), TOKEN, COURSE_ID);
        config.logging = LoggingConfig {
            enabled: true,
            max_bytes: 1024 * 1024,
            path: dir.path().join("moodle-debug.log"),
        };
        Self { server, config, _dir: dir }
    }

    /// Answer every POST of `function` with `status` and `body`.
    pub async fn on(&self, function: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(query_param("wsfunction", function))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received for `function`, in arrival order.
    pub async fn requests_for(&self, function: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| {
                request.url.query_pairs().any(|(key, value)| key == "wsfunction" && value == function)
            })
            .collect()
    }

    pub fn log(&self) -> Arc<RotatingLog> {
        Arc::new(RotatingLog::new(self.config.logging.clone()))
    }

    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(&self.config.logging.path).unwrap_or_default()
    }

    pub fn service(&self, annotator: Arc<NoteCollector>) -> EnrolmentService {
        let gateway = MoodleRestGateway::with_defaults().expect("gateway should build");
        EnrolmentService::new(Arc::new(gateway), annotator, self.log())
    }
}

/// Form body of a captured request as decoded pairs.
pub fn form_pairs(request: &wiremock::Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body).into_owned().collect()
}

pub fn form_value(request: &wiremock::Request, key: &str) -> Option<String> {
    form_pairs(request).into_iter().find(|(name, _)| name == key).map(|(_, value)| value)
}

/// Annotator keeping notes in memory.
#[derive(Default)]
pub struct NoteCollector {
    notes: Mutex<Vec<(OrderRef, String)>>,
}

impl NoteCollector {
    pub fn notes(&self) -> Vec<(OrderRef, String)> {
        self.notes.lock().expect("notes mutex poisoned").clone()
    }
}

#[async_trait]
impl OrderAnnotator for NoteCollector {
    async fn annotate(&self, order: &OrderRef, note: &str) -> Result<()> {
        self.notes.lock().expect("notes mutex poisoned").push((order.clone(), note.to_string()));
        Ok(())
    }
}
