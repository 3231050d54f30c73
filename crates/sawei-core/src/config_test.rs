use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SAWEI_ENV"));
}

#[test]
fn build_app_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.scrape_dir.to_str(), Some("./Catalogue_Boutique78"));
    assert!(cfg.complete_export_path.is_none());
    assert_eq!(cfg.catalogue_path.to_str(), Some("./data/catalogue.json"));
    assert_eq!(cfg.categories_path.to_str(), Some("./config/categories.yaml"));
    assert_eq!(cfg.eur_per_cny, dec("0.13"));
    assert_eq!(cfg.margin, dec("0.10"));
    assert_eq!(cfg.placeholder_image, "5e1152055e503.jpg");
    assert!(cfg.admin_tokens.is_empty());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SAWEI_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAWEI_BIND_ADDR"),
        "expected InvalidEnvVar(SAWEI_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_pricing_policy() {
    let mut map = HashMap::new();
    map.insert("SAWEI_EUR_PER_CNY", "0.128");
    map.insert("SAWEI_MARGIN", "0.25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.eur_per_cny, dec("0.128"));
    assert_eq!(cfg.margin, dec("0.25"));
}

#[test]
fn build_app_config_rejects_non_numeric_rate() {
    let mut map = HashMap::new();
    map.insert("SAWEI_EUR_PER_CNY", "thirteen cents");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAWEI_EUR_PER_CNY"),
        "expected InvalidEnvVar(SAWEI_EUR_PER_CNY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_rate() {
    let mut map = HashMap::new();
    map.insert("SAWEI_EUR_PER_CNY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAWEI_EUR_PER_CNY"));
}

#[test]
fn build_app_config_rejects_negative_margin() {
    let mut map = HashMap::new();
    map.insert("SAWEI_MARGIN", "-0.1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAWEI_MARGIN"));
}

#[test]
fn build_app_config_optional_export_path_ignores_blank() {
    let mut map = HashMap::new();
    map.insert("SAWEI_COMPLETE_EXPORT_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.complete_export_path.is_none());

    map.insert("SAWEI_COMPLETE_EXPORT_PATH", "../catalogue_complet.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.complete_export_path.as_deref().and_then(|p| p.to_str()),
        Some("../catalogue_complet.json")
    );
}

#[test]
fn build_app_config_splits_admin_tokens() {
    let mut map = HashMap::new();
    map.insert("SAWEI_ADMIN_TOKENS", " alpha, ,beta ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.admin_tokens, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn build_app_config_requires_admin_tokens_in_production() {
    let mut map = HashMap::new();
    map.insert("SAWEI_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SAWEI_ADMIN_TOKENS"),
        "expected MissingEnvVar(SAWEI_ADMIN_TOKENS), got: {result:?}"
    );

    map.insert("SAWEI_ADMIN_TOKENS", "s3cret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn debug_output_redacts_admin_tokens() {
    let mut map = HashMap::new();
    map.insert("SAWEI_ADMIN_TOKENS", "s3cret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("s3cret"));
    assert!(rendered.contains("1 redacted"));
}
