//! # Academy Enrol Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The `reqwest` transport and the retrying HTTP client
//! - The Moodle REST gateway
//! - The rotating diagnostic log file
//! - Configuration loading (environment, JSON, TOML)
//! - Config-backed course catalog and log-backed order notes
//!
//! ## Architecture
//! - Implements traits defined in `academy-enrol-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod catalog;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod moodle;
pub mod notes;

// Re-export commonly used items
pub use catalog::InMemoryCourseCatalog;
pub use errors::InfraError;
pub use http::{OutboundRequest, RawResponse, ReqwestTransport, RetryingHttpClient, Transport};
pub use logging::RotatingLog;
pub use moodle::MoodleRestGateway;
pub use notes::LoggedOrderNotes;
