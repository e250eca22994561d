//! Enrolment request and outcome types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EnrolmentConfig;

/// Opaque reference to the shop order that triggered an enrolment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRef(String);

impl OrderRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for OrderRef {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One learner to enrol, built fresh for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentRequest {
    pub first_name: String,
    pub last_name: String,
    /// Sole lookup key on the remote site.
    pub email: String,
    pub order_ref: Option<OrderRef>,
    pub course_override: Option<u64>,
}

impl EnrolmentRequest {
    /// Request from the manual test trigger: no order and no override.
    pub fn manual(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            order_ref: None,
            course_override: None,
        }
    }

    /// Attach the originating order; enables order annotations.
    #[must_use]
    pub fn with_order(mut self, order_ref: OrderRef) -> Self {
        self.order_ref = Some(order_ref);
        self
    }

    #[must_use]
    pub fn with_course_override(mut self, course_id: Option<u64>) -> Self {
        self.course_override = course_id;
        self
    }
}

/// User account on the remote site. Never cached between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub email: String,
}

/// Result of one orchestrated enrolment.
///
/// Reasons are short and safe to show to shop staff; raw responses, headers
/// and URLs only ever go to the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnrolmentOutcome {
    Success { user_id: u64, course_id: u64 },
    ConfigError { reason: String },
    LookupFailure { reason: String },
    CreationFailure { reason: String },
    EnrolFailure { user_id: u64, course_id: u64, reason: String },
}

impl EnrolmentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::ConfigError { .. } => "config_error",
            Self::LookupFailure { .. } => "lookup_failure",
            Self::CreationFailure { .. } => "creation_failure",
            Self::EnrolFailure { .. } => "enrol_failure",
        }
    }

    /// Note text recorded on the originating order.
    pub fn annotation(&self, config: &EnrolmentConfig) -> String {
        match self {
            Self::Success { user_id, course_id } => format!(
                "Moodle enrolment SUCCESS. user_id={user_id} in course_id={course_id}. \
                 Participants: {}",
                config.participants_url(*course_id)
            ),
            Self::ConfigError { reason } => format!("Moodle enrolment error: {reason}."),
            Self::LookupFailure { reason } => {
                format!("Moodle enrolment FAILED during user lookup: {reason}")
            }
            Self::CreationFailure { reason } => {
                format!("Moodle enrolment FAILED during user creation: {reason}")
            }
            Self::EnrolFailure { user_id, course_id, reason } => format!(
                "Moodle enrolment FAILED for user_id={user_id} course_id={course_id}: {reason}"
            ),
        }
    }
}

impl fmt::Display for EnrolmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { .. } => f.write_str("User successfully enrolled in the course!"),
            Self::ConfigError { reason } => write!(f, "Moodle enrolment error: {reason}."),
            Self::LookupFailure { reason } => write!(f, "Moodle lookup failed: {reason}"),
            Self::CreationFailure { reason } => {
                write!(f, "Moodle enrolment failed: user creation error ({reason}). See log.")
            }
            Self::EnrolFailure { reason, .. } => {
                write!(f, "Moodle enrolment failed during enrol call ({reason}). See log.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnrolmentConfig {
        EnrolmentConfig::new("https://lms.example.com", "secret", 3)
    }

    #[test]
    fn success_annotation_names_user_course_and_participants_link() {
        let note = EnrolmentOutcome::Success { user_id: 42, course_id: 3 }.annotation(&config());
        assert!(note.contains("SUCCESS"));
        assert!(note.contains("user_id=42"));
        assert!(note.contains("course_id=3"));
        assert!(note.contains("https://lms.example.com/enrol/index.php?id=3"));
    }

    #[test]
    fn enrol_failure_annotation_names_user_and_course() {
        let outcome = EnrolmentOutcome::EnrolFailure {
            user_id: 7,
            course_id: 3,
            reason: "HTTP request timed out".into(),
        };
        let note = outcome.annotation(&config());
        assert_eq!(note, "Moodle enrolment FAILED for user_id=7 course_id=3: HTTP request timed out");
    }

    #[test]
    fn annotations_never_include_token() {
        let cfg = config();
        let outcomes = [
            EnrolmentOutcome::Success { user_id: 1, course_id: 3 },
            EnrolmentOutcome::LookupFailure { reason: "HTTP request timed out".into() },
            EnrolmentOutcome::CreationFailure { reason: "bad response".into() },
        ];
        for outcome in outcomes {
            assert!(!outcome.annotation(&cfg).contains("secret"));
            assert!(!outcome.to_string().contains("secret"));
        }
    }

    #[test]
    fn display_is_short_status() {
        assert_eq!(
            EnrolmentOutcome::Success { user_id: 1, course_id: 2 }.to_string(),
            "User successfully enrolled in the course!"
        );
        assert_eq!(
            EnrolmentOutcome::LookupFailure { reason: "HTTP request timed out".into() }
                .to_string(),
            "Moodle lookup failed: HTTP request timed out"
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(EnrolmentOutcome::Success { user_id: 42, course_id: 3 })
            .expect("serialize");
        assert_eq!(json["status"], "success");
        assert_eq!(json["user_id"], 42);
    }

    #[test]
    fn manual_request_has_no_order_or_override() {
        let request = EnrolmentRequest::manual("Ada", "Lovelace", "ada@example.com");
        assert!(request.order_ref.is_none());
        assert!(request.course_override.is_none());

        let request = request.with_order(OrderRef::from(1001)).with_course_override(Some(8));
        assert_eq!(request.order_ref.as_ref().map(OrderRef::as_str), Some("1001"));
        assert_eq!(request.course_override, Some(8));
    }
}
