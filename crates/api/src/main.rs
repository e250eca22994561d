//! `academy-enrol` - enrol shop customers into Moodle courses.
//!
//! Results go to stdout (text or JSON); process logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use academy_enrol_api::cli::{Cli, Command, OutputFormat};
use academy_enrol_api::commands::{
    check_config, clear_log, enrol_manual, enrol_order, read_event, site_info,
};
use academy_enrol_api::utils::logging::{error_label, init_tracing};
use academy_enrol_api::AppContext;
use academy_enrol_domain::EnrolmentOutcome;
use academy_enrol_infra::config;
use anyhow::Context;
use clap::Parser;
use serde::Serialize;

const EXIT_FAILURE: u8 = 1;
const EXIT_SETUP: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before tracing reads RUST_LOG.
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.json_logs);
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded"),
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_SETUP)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = config::load_with_override(cli.config.clone()).map_err(|err| {
        tracing::error!(error = %err, kind = error_label(&err), "configuration could not be loaded");
        err
    });
    let settings = loaded.context("no usable configuration")?;

    if let Command::CheckConfig = cli.command {
        let report = check_config(&settings);
        let ok = report.is_complete();
        emit(cli.format, &report, || {
            if ok {
                "Configuration complete.".to_string()
            } else {
                format!("Missing settings: {}", report.missing.join(", "))
            }
        })?;
        return Ok(exit_code(ok));
    }

    let context = AppContext::new(settings)?;

    match cli.command {
        Command::Enrol { first_name, last_name, email } => {
            let outcome = enrol_manual(&context, &first_name, &last_name, &email).await;
            emit_outcome(cli.format, &outcome)
        }
        Command::Order { event } => {
            let event = read_event(&event)?;
            let outcome = enrol_order(&context, &event).await;
            emit_outcome(cli.format, &outcome)
        }
        Command::SiteInfo => {
            let report = site_info(&context).await?;
            let ok = report.is_ok();
            emit(cli.format, &report, || {
                format!(
                    "HTTP {} from {} (release {}){}. Full response in {}.",
                    report.status,
                    report.site_name.as_deref().unwrap_or("unknown site"),
                    report.release.as_deref().unwrap_or("unknown"),
                    if report.remote_exception { ", web service exception reported" } else { "" },
                    context.log.path().display(),
                )
            })?;
            Ok(exit_code(ok))
        }
        Command::ClearLog => {
            let removed = clear_log(&context)?;
            let path = context.log.path().display().to_string();
            emit(cli.format, &serde_json::json!({ "removed": removed, "path": &path }), || {
                if removed {
                    format!("Deleted {path}.")
                } else {
                    format!("No log file at {path}.")
                }
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckConfig => Ok(ExitCode::SUCCESS),
    }
}

fn emit_outcome(format: OutputFormat, outcome: &EnrolmentOutcome) -> anyhow::Result<ExitCode> {
    emit(format, outcome, || outcome.to_string())?;
    Ok(exit_code(outcome.is_success()))
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    }
}
