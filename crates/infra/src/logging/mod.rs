//! Operator-facing diagnostic log.

pub mod rotating_log;

pub use rotating_log::{format_record, RotatingLog};
