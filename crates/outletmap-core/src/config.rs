use crate::app_config::AppConfig;
use crate::ConfigError;

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
/// Every setting has a default, so an empty environment yields a config that
/// talks to a backend on localhost.
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

    let parse_radius = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a non-negative distance in meters, got {raw}"),
            });
        }
        Ok(value)
    };

    let api_base_url = or_default(
        "OUTLETMAP_API_BASE_URL",
        "http://127.0.0.1:8000/subway-kl-api",
    );
    if api_base_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "OUTLETMAP_API_BASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let outlets_path = or_default("OUTLETMAP_OUTLETS_PATH", "outlets")
        .trim_matches('/')
        .to_string();
    if outlets_path.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "OUTLETMAP_OUTLETS_PATH".to_string(),
            reason: "must name a path segment".to_string(),
        });
    }

    let log_level = or_default("OUTLETMAP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("OUTLETMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("OUTLETMAP_USER_AGENT", "outletmap/0.1 (outlet-viewer)");
    let highlight_radius_meters = parse_radius("OUTLETMAP_HIGHLIGHT_RADIUS_METERS", "5000")?;

    Ok(AppConfig {
        api_base_url,
        outlets_path,
        log_level,
        request_timeout_secs,
        user_agent,
        highlight_radius_meters,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
