//! Configuration management
//!
//! [`EnrolmentConfig`] is the read-only snapshot a single enrolment run works
//! from. It is captured once when the run starts and never re-read mid-flow.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_MAX_BYTES, DEFAULT_LOG_PATH, PARTICIPANTS_PATH};

/// Settings for one enrolment run against a Moodle site.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrolmentConfig {
    /// Base URL of the Moodle site, including any subfolder.
    #[serde(default)]
    pub base_domain: String,
    /// Web service token, sent as the `wstoken` query parameter.
    #[serde(default, skip_serializing)]
    pub api_token: String,
    /// Course used when no product override applies. `0` means unset.
    #[serde(default)]
    pub default_course_id: u64,
    /// Explicit `auth` plugin for created users; omitted when `None`.
    #[serde(default)]
    pub auth_method: Option<String>,
    /// Sent as the `Referer` header when present.
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Course overrides keyed by product id (as text), read by the in-memory
    /// catalog.
    #[serde(default)]
    pub product_courses: BTreeMap<String, u64>,
}

/// Diagnostic log settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_max_bytes() -> u64 {
    DEFAULT_LOG_MAX_BYTES
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true, max_bytes: DEFAULT_LOG_MAX_BYTES, path: default_log_path() }
    }
}

impl EnrolmentConfig {
    /// Create a configuration with default logging and no overrides.
    pub fn new(
        base_domain: impl Into<String>,
        api_token: impl Into<String>,
        default_course_id: u64,
    ) -> Self {
        Self {
            base_domain: base_domain.into(),
            api_token: api_token.into(),
            default_course_id,
            auth_method: None,
            site_url: None,
            logging: LoggingConfig::default(),
            product_courses: BTreeMap::new(),
        }
    }

    /// Normalise raw settings the way the settings form stores them.
    ///
    /// - domain: surrounding whitespace and trailing slashes removed
    /// - token: ASCII alphanumerics only
    /// - auth method: trimmed, empty becomes `None`
    /// - log size: `0` falls back to the 1 MiB default
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.base_domain = self.base_domain.trim().trim_end_matches('/').to_string();
        self.api_token.retain(|c| c.is_ascii_alphanumeric());
        self.auth_method = self
            .auth_method
            .map(|method| method.trim().to_string())
            .filter(|method| !method.is_empty());
        self.site_url = self.site_url.map(|url| url.trim().to_string()).filter(|url| !url.is_empty());
        if self.logging.max_bytes == 0 {
            self.logging.max_bytes = DEFAULT_LOG_MAX_BYTES;
        }
        self
    }

    /// Course to enrol into: a positive override wins, then a positive default.
    pub fn effective_course_id(&self, course_override: Option<u64>) -> Option<u64> {
        course_override
            .filter(|id| *id > 0)
            .or_else(|| Some(self.default_course_id).filter(|id| *id > 0))
    }

    /// Names of the settings that prevent an enrolment run.
    pub fn missing_settings(&self, course_override: Option<u64>) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_domain.trim().is_empty() {
            missing.push("domain");
        }
        if self.api_token.trim().is_empty() {
            missing.push("token");
        }
        if self.effective_course_id(course_override).is_none() {
            missing.push("course");
        }
        missing
    }

    /// Auth hint to send on user creation, if any.
    pub fn auth_hint(&self) -> Option<&str> {
        self.auth_method.as_deref().map(str::trim).filter(|method| !method.is_empty())
    }

    /// Link to the course enrolment page, used in success annotations.
    pub fn participants_url(&self, course_id: u64) -> String {
        format!("{}{PARTICIPANTS_PATH}?id={course_id}", self.base_domain.trim_end_matches('/'))
    }
}

impl fmt::Debug for EnrolmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrolmentConfig")
            .field("base_domain", &self.base_domain)
            .field("api_token", &if self.api_token.is_empty() { "<empty>" } else { "<redacted>" })
            .field("default_course_id", &self.default_course_id)
            .field("auth_method", &self.auth_method)
            .field("site_url", &self.site_url)
            .field("logging", &self.logging)
            .field("product_courses", &self.product_courses.len())
            .finish()
    }
}
