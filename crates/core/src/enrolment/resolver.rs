//! Remote user resolution: look the learner up by email, create on miss

use std::sync::Arc;

use academy_enrol_domain::{
    EnrolmentConfig, EnrolmentRequest, LogPayload, RemoteUser, ResolverError, WsFunction,
    WsRequest,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ports::{DiagnosticLog, WebServiceGateway};
use super::username::synthesize_username;

/// Locates or creates the remote account for an enrolment request.
pub struct UserResolver {
    gateway: Arc<dyn WebServiceGateway>,
}

impl UserResolver {
    pub fn new(gateway: Arc<dyn WebServiceGateway>) -> Self {
        Self { gateway }
    }

    /// Resolve the remote user for `request.email`.
    ///
    /// A lookup hit returns immediately. A miss (including an unparsable
    /// lookup body) issues exactly one creation call.
    ///
    /// # Errors
    /// - [`ResolverError::Lookup`] when the lookup call gets no response
    /// - [`ResolverError::Creation`] when creation gets no response or the
    ///   response carries no new user id
    pub async fn resolve(
        &self,
        request: &EnrolmentRequest,
        config: &EnrolmentConfig,
        log: &dyn DiagnosticLog,
    ) -> Result<RemoteUser, ResolverError> {
        if let Some(id) = self.lookup(&request.email, config, log).await? {
            debug!(user_id = id, "found existing remote user");
            return Ok(RemoteUser { id, email: request.email.clone() });
        }

        let id = self.create(request, config, log).await?;
        info!(user_id = id, "created remote user");
        Ok(RemoteUser { id, email: request.email.clone() })
    }

    async fn lookup(
        &self,
        email: &str,
        config: &EnrolmentConfig,
        log: &dyn DiagnosticLog,
    ) -> Result<Option<u64>, ResolverError> {
        let call = WsRequest::post(WsFunction::GetUsersByField)
            .param("field", "email")
            .param("values[0]", email);

        let response = self
            .gateway
            .call(config, &call, log)
            .await
            .map_err(|err| ResolverError::Lookup(err.to_string()))?;

        log.record(&parsed_label(call.function), LogPayload::from(response.body.as_str()));
        Ok(first_record_id(&response.body))
    }

    async fn create(
        &self,
        request: &EnrolmentRequest,
        config: &EnrolmentConfig,
        log: &dyn DiagnosticLog,
    ) -> Result<u64, ResolverError> {
        let username =
            synthesize_username(&request.first_name, &request.last_name, &mut rand::thread_rng());

        let mut call = WsRequest::post(WsFunction::CreateUsers)
            .param("users[0][username]", username)
            .param("users[0][firstname]", &request.first_name)
            .param("users[0][lastname]", &request.last_name)
            .param("users[0][email]", &request.email)
            .param("users[0][createpassword]", 1);
        // The remote site only applies its default auth plugin when the field
        // is absent.
        if let Some(auth) = config.auth_hint() {
            call = call.param("users[0][auth]", auth);
        }

        let response = self
            .gateway
            .call(config, &call, log)
            .await
            .map_err(|err| ResolverError::Creation(err.to_string()))?;

        log.record(&parsed_label(call.function), LogPayload::from(response.body.as_str()));

        first_record_id(&response.body).ok_or_else(|| {
            warn!(status = response.status, "user creation response carried no user id");
            ResolverError::Creation(format!(
                "unexpected response (HTTP {}) from {}; see the enrolment log",
                response.status,
                WsFunction::CreateUsers
            ))
        })
    }
}

fn parsed_label(function: WsFunction) -> String {
    format!("{function} parsed")
}

/// Positive `id` of the first record of a JSON array body.
///
/// Error objects, empty arrays and non-JSON bodies all yield `None`.
pub fn first_record_id(body: &str) -> Option<u64> {
    let value: Value = serde_json::from_str(body).ok()?;
    let id = value.as_array()?.first()?.get("id")?;
    let id = match id {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}
