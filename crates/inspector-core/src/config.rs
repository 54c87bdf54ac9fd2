use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("INSPECTOR_ENV", "development"));
    let bind_addr = parse_addr("INSPECTOR_BIND_ADDR", "127.0.0.1:5050")?;
    let log_level = or_default("INSPECTOR_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("INSPECTOR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("INSPECTOR_USER_AGENT", DEFAULT_USER_AGENT);
    let inter_request_delay_ms = parse_u64("INSPECTOR_INTER_REQUEST_DELAY_MS", "250")?;
    let max_retries = parse_u32("INSPECTOR_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("INSPECTOR_RETRY_BACKOFF_BASE_SECS", "1")?;
    let max_api_pages = parse_u32("INSPECTOR_MAX_API_PAGES", "50")?;
    let max_dialog_pages = parse_u32("INSPECTOR_MAX_DIALOG_PAGES", "20")?;

    let analysis_url = lookup("INSPECTOR_ANALYSIS_URL")
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty());
    if let Some(url) = &analysis_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(invalid(
                "INSPECTOR_ANALYSIS_URL",
                format!("\"{url}\" is not an http(s) URL"),
            ));
        }
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        max_api_pages,
        max_dialog_pages,
        analysis_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
