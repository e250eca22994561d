//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Academy Enrol
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AcademyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Academy Enrol operations
pub type Result<T> = std::result::Result<T, AcademyError>;

/// Failure to obtain any HTTP response from the remote site.
///
/// Messages never include the request URL: the URL carries the web service
/// token and these messages end up in order notes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP request timed out")]
    Timeout,

    #[error("HTTP connection failure: {0}")]
    Connection(String),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("HTTP request could not be built: {0}")]
    Build(String),
}

/// Failure while locating or creating the remote user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The lookup call never produced a response.
    #[error("user lookup failed: {0}")]
    Lookup(String),

    /// The creation call failed at the transport level or returned something
    /// other than a created user.
    #[error("user creation failed: {0}")]
    Creation(String),
}

/// Failure of the enrolment call itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrolError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The response body reported an exception (the remote API does this
    /// with a 200 status).
    #[error("remote site reported an exception; see the enrolment log")]
    RemoteException,
}

impl From<TransportError> for AcademyError {
    fn from(value: TransportError) -> Self {
        Self::Network(value.to_string())
    }
}

impl From<std::io::Error> for AcademyError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
