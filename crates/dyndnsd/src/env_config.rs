//! Configuration from environment variables
//!
//! Variables are read through a lookup function so tests can feed a map
//! instead of touching the process environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `IONOS_API_KEY` | required |
//! | `IONOS_DOMAINS` | required, comma-separated |
//! | `UPDATE_INTERVAL_SECONDS` | 300 |
//! | `HEARTBEAT_INTERVAL_SECONDS` | 21600 |
//! | `HEALTH_PORT` | 8080 |
//! | `HTTP_TIMEOUT_SECONDS` | 30 |
//! | `IONOS_API_URL` | IONOS endpoint |
//! | `LOG_LEVEL` | info |

use anyhow::{Context, Result};
use dyndns_core::DyndnsConfig;
use std::str::FromStr;
use std::time::Duration;
use tracing::{Level, warn};

pub const API_KEY_VAR: &str = "IONOS_API_KEY";
pub const DOMAINS_VAR: &str = "IONOS_DOMAINS";
pub const UPDATE_INTERVAL_VAR: &str = "UPDATE_INTERVAL_SECONDS";
pub const HEARTBEAT_INTERVAL_VAR: &str = "HEARTBEAT_INTERVAL_SECONDS";
pub const HEALTH_PORT_VAR: &str = "HEALTH_PORT";
pub const HTTP_TIMEOUT_VAR: &str = "HTTP_TIMEOUT_SECONDS";
pub const API_URL_VAR: &str = "IONOS_API_URL";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Log level from `LOG_LEVEL`; unknown or missing values mean INFO
pub fn log_level(lookup: impl Fn(&str) -> Option<String>) -> Level {
    match lookup(LOG_LEVEL_VAR)
        .unwrap_or_default()
        .trim()
        .to_uppercase()
        .as_str()
    {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Build and validate the updater configuration
pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<DyndnsConfig> {
    let api_key = lookup(API_KEY_VAR).filter(|k| !k.is_empty());
    let Some(api_key) = api_key else {
        anyhow::bail!("{} not defined", API_KEY_VAR);
    };

    let domains: Vec<String> = lookup(DOMAINS_VAR)
        .unwrap_or_default()
        .split(',')
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if domains.is_empty() {
        anyhow::bail!("{} not defined", DOMAINS_VAR);
    }

    let mut config = DyndnsConfig::new(api_key, domains)
        .with_update_interval(Duration::from_secs(parse_or(
            &lookup,
            UPDATE_INTERVAL_VAR,
            300,
        )))
        .with_heartbeat_interval(Duration::from_secs(parse_or(
            &lookup,
            HEARTBEAT_INTERVAL_VAR,
            21600,
        )))
        .with_health_port(parse_or(&lookup, HEALTH_PORT_VAR, 8080));

    config.provider.http_timeout_secs = parse_or(&lookup, HTTP_TIMEOUT_VAR, 30);
    config.provider.endpoint = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty());

    config
        .validate()
        .context("Configuration validation error")?;

    Ok(config)
}

/// Parse a numeric variable, falling back to `default` when unset or malformed
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) if raw.trim().is_empty() => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = key, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
    }
}
