//! Command-line surface of the `academy-enrol` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "academy-enrol")]
#[command(version)]
#[command(about = "Enrol shop customers into Moodle courses")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (JSON or TOML); skips the environment and path probing
    #[arg(long, short, global = true, env = "ACADEMY_ENROL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for command results
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Emit process logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enrol one person by hand (no order, no course override)
    Enrol {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },

    /// Enrol the billing contact of a completed order
    Order {
        /// Order-completion event as JSON
        #[arg(long)]
        event: PathBuf,
    },

    /// Call core_webservice_get_site_info once and report the result
    SiteInfo,

    /// List the settings that would block an enrolment
    CheckConfig,

    /// Delete the diagnostic log file
    ClearLog,
}
