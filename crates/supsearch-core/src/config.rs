use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1/suppliers";
const DEFAULT_USER_AGENT: &str = "supsearch/0.1 (supplier-search)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    load_app_config_with(None)
}

/// Like [`load_app_config`], but a `base_url_override` (from `--base-url`)
/// replaces `SUPSEARCH_API_BASE_URL`. With an override present, production
/// no longer requires the variable to be set.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid, including a malformed override.
pub fn load_app_config_with(base_url_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key), base_url_override)
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), None)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F, base_url_override: Option<&str>) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            _ => Ok(None),
        }
    };

    let env = parse_environment(&or_default("SUPSEARCH_ENV", "development"));

    // Production must name the backend explicitly; the localhost default is
    // for development only.
    let api_base_url = match base_url_override {
        Some(url) => {
            validate_base_url("--base-url", url)?;
            url.to_string()
        }
        None if env == Environment::Production => require("SUPSEARCH_API_BASE_URL")?,
        None => or_default("SUPSEARCH_API_BASE_URL", DEFAULT_API_BASE_URL),
    };
    validate_base_url("SUPSEARCH_API_BASE_URL", &api_base_url)?;

    let log_level = or_default("SUPSEARCH_LOG_LEVEL", "warn");
    let request_timeout_secs = parse_optional_u64("SUPSEARCH_REQUEST_TIMEOUT_SECS")?;
    if request_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SUPSEARCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("SUPSEARCH_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
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

/// Cheap shape check; full URL parsing happens when the HTTP client is built.
fn validate_base_url(var: &str, raw: &str) -> Result<(), ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got \"{raw}\""),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
