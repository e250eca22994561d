//! Shared test helpers for `academy-enrol-core` integration tests.
//!
//! Lightweight in-memory doubles for every core port so scenarios can focus
//! on the orchestration behaviour instead of HTTP plumbing.

pub mod doubles;

use academy_enrol_domain::{EnrolmentConfig, EnrolmentRequest};

pub const COURSE_ID: u64 = 11;

/// Fully configured snapshot pointing at a fake site.
pub fn config() -> EnrolmentConfig {
    EnrolmentConfig::new("https://lms.example.com", "tok3n", COURSE_ID)
}

pub fn ada() -> EnrolmentRequest {
    EnrolmentRequest::manual("Ada", "Lovelace", "ada@example.com")
}
