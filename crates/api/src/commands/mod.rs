//! Command implementations behind the CLI subcommands.

pub mod check_config;
pub mod clear_log;
pub mod enrol;
pub mod order;
pub mod site_info;

pub use check_config::{check_config, ConfigReport};
pub use clear_log::clear_log;
pub use enrol::enrol_manual;
pub use order::{enrol_order, read_event};
pub use site_info::{site_info, SiteInfoReport};
