use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{other}'"),
            }),
        }
    };

    let webdriver_url = or_default("FEINPREIS_WEBDRIVER_URL", "http://localhost:9515");
    let headless = parse_bool("FEINPREIS_HEADLESS", "true")?;
    let user_agent = or_default(
        "FEINPREIS_USER_AGENT",
        "Mozilla/5.0 (X11; Linux x86_64) feinpreis/0.1",
    );
    let log_level = or_default("FEINPREIS_LOG_LEVEL", "info");

    let targets_path = PathBuf::from(or_default(
        "FEINPREIS_TARGETS_PATH",
        "./config/targets.yaml",
    ));
    let report_path = PathBuf::from(or_default(
        "FEINPREIS_REPORT_PATH",
        "./reports/prices.json",
    ));
    let report_source = or_default("FEINPREIS_REPORT_SOURCE", "feinpreis");

    let navigation_timeout_secs = parse_u64("FEINPREIS_NAVIGATION_TIMEOUT_SECS", "30")?;
    let selector_timeout_ms = parse_u64("FEINPREIS_SELECTOR_TIMEOUT_MS", "5000")?;

    let pacing_base_ms = parse_u64("FEINPREIS_PACING_BASE_MS", "2000")?;
    let pacing_jitter_ms = parse_u64("FEINPREIS_PACING_JITTER_MS", "1500")?;

    Ok(AppConfig {
        webdriver_url,
        headless,
        user_agent,
        log_level,
        targets_path,
        report_path,
        report_source,
        navigation_timeout_secs,
        selector_timeout_ms,
        pacing_base_ms,
        pacing_jitter_ms,
    })
}
