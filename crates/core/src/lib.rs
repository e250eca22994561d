//! # Academy Enrol Core
//!
//! Enrolment orchestration - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the web service, diagnostic log, order
//!   notes and product course overrides
//! - User resolution (lookup by email, create on miss)
//! - The enrolment call and its response classification
//! - The orchestrator tying them together, plus the order-completion handler
//!
//! ## Architecture Principles
//! - Only depends on `academy-enrol-domain`
//! - No HTTP, filesystem, or process-level code
//! - All external dependencies via traits
//! - The remote site is the only source of truth: nothing is cached

pub mod diagnostics;
pub mod enrolment;
pub mod orders;

pub use diagnostics::SiteInfoProbe;
pub use enrolment::ports::{DiagnosticLog, NullLog, OrderAnnotator, WebServiceGateway};
pub use enrolment::{EnrolmentExecutor, EnrolmentService, UserResolver};
pub use orders::ports::CourseCatalog;
pub use orders::OrderEnrolmentHandler;
