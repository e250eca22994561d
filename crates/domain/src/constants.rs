//! Application constants
//!
//! Centralized location for the protocol and policy constants used by the
//! enrolment pipeline.

// Remote web service endpoint
pub const REST_ENDPOINT_PATH: &str = "/webservice/rest/server.php";
pub const REST_FORMAT: &str = "json";
pub const PARTICIPANTS_PATH: &str = "/enrol/index.php";

// HTTP policy
pub const REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF_SECS: u64 = 1;
pub const USER_AGENT_PREFIX: &str = "academy-enrol";

// Moodle role id of "student"
pub const STUDENT_ROLE_ID: u32 = 5;

// Username synthesis
pub const USERNAME_SUFFIX_LEN: usize = 4;
pub const FALLBACK_USERNAME_SUFFIX_LEN: usize = 6;
pub const FALLBACK_USERNAME_PREFIX: &str = "user.";

// Diagnostic log
pub const DEFAULT_LOG_MAX_BYTES: u64 = 1_048_576;
pub const DEFAULT_LOG_PATH: &str = "moodle-debug.log";
pub const LOG_BACKUP_SUFFIX: &str = ".1";
