//! Moodle web service wire types
//!
//! Every remote call goes to the same REST endpoint and is distinguished by
//! its `wsfunction` name. Parameters use Moodle's indexed form-field syntax
//! (`users[0][email]`), so they are kept as ordered string pairs.

use std::time::Duration;

use crate::constants::{DEFAULT_BACKOFF_SECS, DEFAULT_MAX_RETRIES};
use crate::impl_wire_name_conversions;

/// Web service functions used by the enrolment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WsFunction {
    GetUsersByField,
    CreateUsers,
    ManualEnrolUsers,
    GetSiteInfo,
}

impl_wire_name_conversions!(WsFunction {
    GetUsersByField => "core_user_get_users_by_field",
    CreateUsers => "core_user_create_users",
    ManualEnrolUsers => "enrol_manual_enrol_users",
    GetSiteInfo => "core_webservice_get_site_info",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl_wire_name_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
});

/// Attempt budget for one HTTP call.
///
/// `max_retries` counts additional attempts, so a call is tried at most
/// `max_retries + 1` times with a fixed `backoff` between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryBudget {
    pub const fn new(max_retries: u32, backoff: Duration) -> Self {
        Self { max_retries, backoff }
    }

    /// Two retries one second apart.
    pub const fn standard() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, Duration::from_secs(DEFAULT_BACKOFF_SECS))
    }

    pub const fn single_attempt() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub const fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::standard()
    }
}

/// One web service call, independent of site address and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsRequest {
    pub function: WsFunction,
    pub method: HttpMethod,
    pub params: Vec<(String, String)>,
    pub retry: RetryBudget,
}

impl WsRequest {
    /// Form-encoded POST with the standard retry budget.
    pub fn post(function: WsFunction) -> Self {
        Self { function, method: HttpMethod::Post, params: Vec::new(), retry: RetryBudget::standard() }
    }

    /// Query-only GET, attempted once.
    pub fn get(function: WsFunction) -> Self {
        Self {
            function,
            method: HttpMethod::Get,
            params: Vec::new(),
            retry: RetryBudget::single_attempt(),
        }
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Value of the first parameter named `key`.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
    }
}

/// Final HTTP response of a call, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl WsResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }
}
