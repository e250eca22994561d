//! # Academy Enrol Domain
//!
//! Business domain types for the shop-to-Moodle enrolment pipeline.
//!
//! This crate contains:
//! - Enrolment request/outcome types and the order-completion event
//! - The configuration snapshot used by a single enrolment run
//! - Web service wire names (`wsfunction` values) and request/response shapes
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other Academy Enrol crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
