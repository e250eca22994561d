//! Conversions from external infrastructure errors into domain errors.

use academy_enrol_domain::{AcademyError, TransportError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain errors.
#[derive(Debug)]
pub struct InfraError(pub TransportError);

impl From<InfraError> for TransportError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<InfraError> for AcademyError {
    fn from(value: InfraError) -> Self {
        value.0.into()
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        // Request URLs carry the web-service token as a query parameter.
        let err = self.without_url();

        if err.is_timeout() {
            return TransportError::Timeout;
        }

        if err.is_builder() {
            return TransportError::Build(describe(&err));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return TransportError::Connection(root_cause(&err));
        }

        TransportError::Request(describe(&err))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_transport())
    }
}

/// Top-level message followed by the innermost cause, when they differ.
fn describe(err: &HttpError) -> String {
    let top = err.to_string();
    let cause = root_cause(err);
    if cause == top {
        top
    } else {
        format!("{top}: {cause}")
    }
}

fn root_cause(err: &HttpError) -> String {
    let mut current: &dyn std::error::Error = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
