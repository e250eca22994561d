//! Manual enrolment call and response classification

use std::sync::Arc;

use academy_enrol_domain::constants::STUDENT_ROLE_ID;
use academy_enrol_domain::{EnrolError, EnrolmentConfig, LogPayload, WsFunction, WsRequest};
use tracing::warn;

use super::ports::{DiagnosticLog, WebServiceGateway};

/// Enrols a resolved user into a course with the student role.
pub struct EnrolmentExecutor {
    gateway: Arc<dyn WebServiceGateway>,
}

impl EnrolmentExecutor {
    pub fn new(gateway: Arc<dyn WebServiceGateway>) -> Self {
        Self { gateway }
    }

    /// Submit the enrolment and classify the response.
    ///
    /// # Errors
    /// - [`EnrolError::Transport`] when no response was obtained
    /// - [`EnrolError::RemoteException`] when the body reports an exception,
    ///   whatever the HTTP status
    pub async fn enrol(
        &self,
        user_id: u64,
        course_id: u64,
        config: &EnrolmentConfig,
        log: &dyn DiagnosticLog,
    ) -> Result<(), EnrolError> {
        let call = WsRequest::post(WsFunction::ManualEnrolUsers)
            .param("enrolments[0][roleid]", STUDENT_ROLE_ID)
            .param("enrolments[0][userid]", user_id)
            .param("enrolments[0][courseid]", course_id);

        let response = self.gateway.call(config, &call, log).await?;
        log.record(&format!("{} parsed", call.function), LogPayload::from(response.body.as_str()));

        if body_reports_exception(&response.body) {
            warn!(user_id, course_id, status = response.status, "enrolment response reported an exception");
            return Err(EnrolError::RemoteException);
        }
        Ok(())
    }
}

/// Whether an enrolment response body signals failure.
///
/// The remote API reports failures as exception payloads with a 200 status
/// and returns `null` on success, so status codes are not trusted: any body
/// containing `exception` (ASCII case-insensitive) is a failure, anything
/// else is a success.
pub fn body_reports_exception(body: &str) -> bool {
    body.to_ascii_lowercase().contains("exception")
}
