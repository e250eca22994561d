//! Settings check

use std::path::PathBuf;

use academy_enrol_domain::EnrolmentConfig;
use academy_enrol_infra::InMemoryCourseCatalog;
use serde::Serialize;

/// What an operator needs to know before the first enrolment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReport {
    /// Settings still missing, by name (`domain`, `token`, `course`).
    pub missing: Vec<&'static str>,
    pub base_domain: String,
    pub default_course_id: u64,
    pub auth_method: Option<String>,
    pub product_overrides: usize,
    pub logging_enabled: bool,
    pub log_path: PathBuf,
}

impl ConfigReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_config(config: &EnrolmentConfig) -> ConfigReport {
    ConfigReport {
        missing: config.missing_settings(None),
        base_domain: config.base_domain.clone(),
        default_course_id: config.default_course_id,
        auth_method: config.auth_hint().map(str::to_string),
        product_overrides: InMemoryCourseCatalog::from_config(config).len(),
        logging_enabled: config.logging.enabled,
        log_path: config.logging.path.clone(),
    }
}
