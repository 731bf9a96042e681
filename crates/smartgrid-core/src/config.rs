use crate::app_config::{AppConfig, Environment, PageSizes, PinnedMetafield};
use crate::ConfigError;

/// Largest `first:` argument the Admin API accepts on a connection.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        let value = lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar(var.to_string()));
        }
        Ok(value)
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_page_size = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let size = parse_u32(var, default)?;
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
            });
        }
        Ok(size)
    };

    let shop_domain = normalize_shop_domain(&require("SMARTGRID_SHOP_DOMAIN")?);
    let access_token = require("SMARTGRID_ACCESS_TOKEN")?;

    let env = parse_environment(&or_default("SMARTGRID_ENV", "development"))?;
    let log_level = or_default("SMARTGRID_LOG_LEVEL", "info");
    let api_version = or_default("SMARTGRID_API_VERSION", "2024-10");

    let gateway_timeout_secs = parse_u64("SMARTGRID_GATEWAY_TIMEOUT_SECS", "30")?;
    let gateway_connect_timeout_secs = parse_u64("SMARTGRID_GATEWAY_CONNECT_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("SMARTGRID_USER_AGENT", "smartgrid/0.1 (collection-browser)");
    let gateway_max_retries = parse_u32("SMARTGRID_GATEWAY_MAX_RETRIES", "0")?;
    let gateway_backoff_base_secs = parse_u64("SMARTGRID_GATEWAY_BACKOFF_BASE_SECS", "2")?;

    let page_sizes = PageSizes {
        collections: parse_page_size("SMARTGRID_COLLECTIONS_PAGE_SIZE", "50")?,
        search: parse_page_size("SMARTGRID_SEARCH_PAGE_SIZE", "5")?,
        products: parse_page_size("SMARTGRID_PRODUCTS_PAGE_SIZE", "5")?,
    };

    let pinned_metafield = PinnedMetafield {
        namespace: or_default("SMARTGRID_PINNED_NAMESPACE", "custom"),
        key: or_default("SMARTGRID_PINNED_KEY", "pinned"),
    };

    Ok(AppConfig {
        env,
        log_level,
        shop_domain,
        access_token,
        api_version,
        gateway_timeout_secs,
        gateway_connect_timeout_secs,
        user_agent,
        gateway_max_retries,
        gateway_backoff_base_secs,
        page_sizes,
        pinned_metafield,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything but the three known names.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SMARTGRID_ENV".to_string(),
            reason: format!("expected development, test or production, got \"{other}\""),
        }),
    }
}

/// Strips scheme and trailing slashes so both `https://x.myshopify.com/` and
/// `x.myshopify.com` resolve to the bare host.
fn normalize_shop_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_owned()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
