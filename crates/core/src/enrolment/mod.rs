//! Enrolment orchestration
//!
//! The flow against the remote site is a fixed sequence with no transactions:
//!
//! 1. look the learner up by email (`core_user_get_users_by_field`)
//! 2. create the account on a miss (`core_user_create_users`)
//! 3. enrol with the student role (`enrol_manual_enrol_users`)
//!
//! Every step is terminal on failure; the sequence is never restarted.

pub mod executor;
pub mod ports;
pub mod resolver;
pub mod service;
pub mod username;

pub use executor::{body_reports_exception, EnrolmentExecutor};
pub use resolver::{first_record_id, UserResolver};
pub use service::EnrolmentService;
pub use username::synthesize_username;
