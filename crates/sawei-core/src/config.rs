use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
///
/// Parsing and validation are decoupled from the process environment so they
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        Decimal::from_str(raw.trim()).map_err(|e| invalid(var, e.to_string()))
    };

    let env = match optional("SAWEI_ENV") {
        Some(raw) => parse_environment(&raw)?,
        None => Environment::Development,
    };

    let bind_addr = or_default("SAWEI_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SAWEI_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SAWEI_LOG_LEVEL", "info");

    let scrape_dir = PathBuf::from(or_default("SAWEI_SCRAPE_DIR", "./Catalogue_Boutique78"));
    let complete_export_path = optional("SAWEI_COMPLETE_EXPORT_PATH").map(PathBuf::from);
    let catalogue_path = PathBuf::from(or_default("SAWEI_CATALOGUE_PATH", "./data/catalogue.json"));
    let categories_path =
        PathBuf::from(or_default("SAWEI_CATEGORIES_PATH", "./config/categories.yaml"));

    let eur_per_cny = parse_decimal("SAWEI_EUR_PER_CNY", "0.13")?;
    if eur_per_cny <= Decimal::ZERO {
        return Err(invalid(
            "SAWEI_EUR_PER_CNY",
            "exchange rate must be positive".to_string(),
        ));
    }

    let margin = parse_decimal("SAWEI_MARGIN", "0.10")?;
    if margin.is_sign_negative() {
        return Err(invalid(
            "SAWEI_MARGIN",
            "margin must not be negative".to_string(),
        ));
    }

    let placeholder_image = or_default("SAWEI_PLACEHOLDER_IMAGE", "5e1152055e503.jpg");
    if placeholder_image.trim().is_empty() {
        return Err(invalid(
            "SAWEI_PLACEHOLDER_IMAGE",
            "placeholder identifier must be non-empty".to_string(),
        ));
    }

    let admin_tokens: Vec<String> = optional("SAWEI_ADMIN_TOKENS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default();

    if admin_tokens.is_empty() && env == Environment::Production {
        return Err(ConfigError::MissingEnvVar("SAWEI_ADMIN_TOKENS".to_string()));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scrape_dir,
        complete_export_path,
        catalogue_path,
        categories_path,
        eur_per_cny,
        margin,
        placeholder_image,
        admin_tokens,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SAWEI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
