use academy_enrol_api::AppContext;
use academy_enrol_domain::{EnrolmentConfig, LoggingConfig};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COURSE_ID: u64 = 11;

/// Context wired against a fake site; keeps the log directory alive.
pub struct TestContext {
    pub context: AppContext,
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestContext {
    pub async fn start(configure: impl FnOnce(&mut EnrolmentConfig)) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("failed to create temporary log directory");

        let mut config = EnrolmentConfig::new(server.uri(), "t0ken", COURSE_ID);
        config.logging =
            LoggingConfig { path: dir.path().join("moodle-debug.log"), ..LoggingConfig::default() };
        configure(&mut config);

        let context = AppContext::new(config).expect("failed to build application context");
        Self { context, server, dir }
    }

    pub async fn respond(&self, http_method: &str, function: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path("/webservice/rest/server.php"))
            .and(query_param("wsfunction", function))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(self.context.log.path()).unwrap_or_default()
    }
}
