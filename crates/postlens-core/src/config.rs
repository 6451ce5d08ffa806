use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://i.instagram.com/api/";
pub const DEFAULT_SESSION_FILE: &str = "ig_session.json";
pub const DEFAULT_USER_AGENT: &str = "postlens/0.1 (engagement-analytics)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if credentials are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if credentials are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    // Empty credentials count as missing.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let ig_username = require("IG_USERNAME")?;
    let ig_password = require("IG_PASSWORD")?;

    let session_file = PathBuf::from(or_default("IG_SESSION_FILE", DEFAULT_SESSION_FILE));
    let target_username = lookup("IG_TARGET_USERNAME")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let api_base_url = or_default("POSTLENS_API_BASE_URL", DEFAULT_API_BASE_URL);
    let posts_to_fetch = parse_positive_usize("POSTLENS_POSTS_TO_FETCH", "25")?;
    let min_hashtag_occurrences = parse_positive_usize("POSTLENS_MIN_HASHTAG_OCCURRENCES", "2")?;
    let request_timeout_secs = parse_u64("POSTLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("POSTLENS_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("POSTLENS_LOG_LEVEL", "info");

    Ok(AppConfig {
        ig_username,
        ig_password,
        session_file,
        target_username,
        api_base_url,
        posts_to_fetch,
        min_hashtag_occurrences,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
