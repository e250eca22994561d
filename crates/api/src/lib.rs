//! # Academy Enrol API
//!
//! Command-line host - commands and main entry point.
//!
//! This crate contains:
//! - The `clap` command-line definition
//! - Command implementations (manual enrolment, order completion, site
//!   info, settings check, log cleanup)
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the infra adapters into the core services

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
