//! Domain types and models

pub mod enrolment;
pub mod log;
pub mod order;
pub mod webservice;

pub use enrolment::{EnrolmentOutcome, EnrolmentRequest, OrderRef, RemoteUser};
pub use log::LogPayload;
pub use order::{LineItem, OrderCompleted};
pub use webservice::{HttpMethod, RetryBudget, WsFunction, WsRequest, WsResponse};
