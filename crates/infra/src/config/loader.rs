//! Configuration loader
//!
//! Loads the enrolment settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If absent, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is passed through
//! [`EnrolmentConfig::sanitized`].
//!
//! ## Environment Variables
//! - `ACADEMY_ENROL_DOMAIN`: Site base URL
//! - `ACADEMY_ENROL_TOKEN`: Web service token
//! - `ACADEMY_ENROL_COURSE_ID`: Default course id
//!
//! Setting any of the three selects the environment as the source; the
//! others then load empty and show up as missing settings.
//! - `ACADEMY_ENROL_AUTH_METHOD`: Auth plugin sent on user creation
//! - `ACADEMY_ENROL_SITE_URL`: Shop URL sent as `Referer`
//! - `ACADEMY_ENROL_LOGGING_ENABLED`: Diagnostic log on/off (default on)
//! - `ACADEMY_ENROL_LOG_MAX_BYTES`: Rotation threshold in bytes
//! - `ACADEMY_ENROL_LOG_PATH`: Diagnostic log file
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./academy-enrol.json` or `./academy-enrol.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. The same names one and two directories up
//! 4. Relative to executable location

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use academy_enrol_domain::{AcademyError, EnrolmentConfig, LoggingConfig, Result};

const CORE_VARS: [&str; 3] =
    ["ACADEMY_ENROL_DOMAIN", "ACADEMY_ENROL_TOKEN", "ACADEMY_ENROL_COURSE_ID"];

const FILE_NAMES: [&str; 4] =
    ["academy-enrol.json", "academy-enrol.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If none of the core
/// variables are set, falls back to loading from a config file.
///
/// # Errors
/// Returns `AcademyError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<EnrolmentConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Explicit file when given, otherwise [`load`].
///
/// # Errors
/// See [`load`] and [`load_from_file`].
pub fn load_with_override(path: Option<PathBuf>) -> Result<EnrolmentConfig> {
    match path {
        Some(path) => load_from_file(Some(path)),
        None => load(),
    }
}

/// Load configuration from environment variables
///
/// At least one of domain, token or course id must be set for the
/// environment to count as a source. Any of the three left unset loads as
/// empty and is reported by [`EnrolmentConfig::missing_settings`].
///
/// # Errors
/// Returns `AcademyError::Config` if none of the core variables are set
/// or a numeric variable has an invalid value.
pub fn load_from_env() -> Result<EnrolmentConfig> {
    let domain = env_opt("ACADEMY_ENROL_DOMAIN");
    let token = env_opt("ACADEMY_ENROL_TOKEN");
    let course = env_opt("ACADEMY_ENROL_COURSE_ID");
    if domain.is_none() && token.is_none() && course.is_none() {
        return Err(AcademyError::Config(format!(
            "None of {} are set",
            CORE_VARS.join(", ")
        )));
    }

    let course_id = match course {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AcademyError::Config(format!("Invalid course id: {}", e)))?,
        None => 0,
    };

    let defaults = LoggingConfig::default();
    let max_bytes = match env_opt("ACADEMY_ENROL_LOG_MAX_BYTES") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AcademyError::Config(format!("Invalid log size: {}", e)))?,
        None => defaults.max_bytes,
    };

    let config = EnrolmentConfig {
        base_domain: domain.unwrap_or_default(),
        api_token: token.unwrap_or_default(),
        default_course_id: course_id,
        auth_method: env_opt("ACADEMY_ENROL_AUTH_METHOD"),
        site_url: env_opt("ACADEMY_ENROL_SITE_URL"),
        logging: LoggingConfig {
            enabled: env_bool("ACADEMY_ENROL_LOGGING_ENABLED", defaults.enabled),
            max_bytes,
            path: env_opt("ACADEMY_ENROL_LOG_PATH").map_or(defaults.path, PathBuf::from),
        },
        product_courses: BTreeMap::new(),
    };

    Ok(config.sanitized())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AcademyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<EnrolmentConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AcademyError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AcademyError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AcademyError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path).map(EnrolmentConfig::sanitized)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `AcademyError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<EnrolmentConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AcademyError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AcademyError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AcademyError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_around(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_around(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_around(dir: &Path) -> Vec<PathBuf> {
    ["", "..", "../.."]
        .iter()
        .flat_map(|up| FILE_NAMES.iter().map(move |name| dir.join(up).join(name)))
        .collect()
}

/// Optional variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
