//! Moodle web service adapter.

pub mod gateway;

pub use gateway::{build_outbound, endpoint_url, MoodleRestGateway};
