//! HTTP plumbing: single-attempt transport and the retrying client on top.

pub mod client;
pub mod transport;

pub use client::{is_retryable_status, RetryingHttpClient};
pub use transport::{OutboundRequest, RawResponse, ReqwestTransport, ReqwestTransportBuilder, Transport};
