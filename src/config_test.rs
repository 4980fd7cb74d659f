use std::collections::HashMap;
use std::time::Duration;

use crate::config::{Config, ConfigError, DEFAULT_BASE_URL, DEFAULT_WEBAPP_URL};
use crate::format::OutputFormat;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn errors_of(result: Result<Config, ConfigError>) -> Vec<String> {
    match result {
        Err(ConfigError::Invalid { errors }) => errors,
        Ok(config) => panic!("expected validation failure, got {:?}", config),
    }
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config = Config::from_lookup(lookup(&[
        ("PRODUCTIVE_API_KEY", "secret"),
        ("PRODUCTIVE_ORGANIZATION", "27956"),
    ]))
    .expect("minimal config should be valid");

    assert_eq!(config.api_token, "secret");
    assert_eq!(config.organization_id, 27956);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.webapp_url, DEFAULT_WEBAPP_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.items_per_page, 50);
    assert_eq!(config.output_format, OutputFormat::Toon);
}

#[test]
fn test_explicit_values_are_used() {
    let config = Config::from_lookup(lookup(&[
        ("PRODUCTIVE_API_KEY", "secret"),
        ("PRODUCTIVE_ORGANIZATION", "42"),
        ("PRODUCTIVE_BASE_URL", "http://localhost:9999/api/v2/"),
        ("PRODUCTIVE_TIMEOUT", "5"),
        ("PRODUCTIVE_ITEMS_PER_PAGE", "200"),
        ("OUTPUT_FORMAT", "json"),
    ]))
    .unwrap();

    // Trailing slash is trimmed so endpoint paths can be appended directly
    assert_eq!(config.base_url, "http://localhost:9999/api/v2");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.items_per_page, 200);
    assert_eq!(config.output_format, OutputFormat::Json);
}

#[test]
fn test_missing_required_values_are_aggregated() {
    let errors = errors_of(Config::from_lookup(lookup(&[])));

    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&"PRODUCTIVE_API_KEY is required".to_string()));
    assert!(errors.contains(&"PRODUCTIVE_ORGANIZATION is required".to_string()));
}

#[test]
fn test_all_violations_reported_together() {
    let errors = errors_of(Config::from_lookup(lookup(&[
        ("PRODUCTIVE_API_KEY", "secret"),
        ("PRODUCTIVE_ORGANIZATION", "-3"),
        ("PRODUCTIVE_TIMEOUT", "0"),
        ("PRODUCTIVE_ITEMS_PER_PAGE", "500"),
        ("OUTPUT_FORMAT", "xml"),
    ])));

    assert_eq!(errors.len(), 4, "got: {:?}", errors);
    assert!(errors.iter().any(|e| e.contains("PRODUCTIVE_ORGANIZATION must be a positive integer")));
    assert!(errors.iter().any(|e| e.contains("PRODUCTIVE_TIMEOUT")));
    assert!(errors.iter().any(|e| e.contains("between 1 and 200")));
    assert!(errors.iter().any(|e| e.contains("OUTPUT_FORMAT")));
}

#[test]
fn test_zero_organization_rejected() {
    let errors = errors_of(Config::from_lookup(lookup(&[
        ("PRODUCTIVE_API_KEY", "secret"),
        ("PRODUCTIVE_ORGANIZATION", "0"),
    ])));

    assert_eq!(
        errors,
        vec!["PRODUCTIVE_ORGANIZATION must be a positive integer".to_string()]
    );
}

#[test]
fn test_non_http_base_url_rejected() {
    let errors = errors_of(Config::from_lookup(lookup(&[
        ("PRODUCTIVE_API_KEY", "secret"),
        ("PRODUCTIVE_ORGANIZATION", "1"),
        ("PRODUCTIVE_BASE_URL", "ftp://example.com"),
    ])));

    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("http(s)"));
}

#[test]
fn test_error_message_joins_all_violations() {
    let err = Config::from_lookup(lookup(&[])).unwrap_err();
    let message = err.to_string();

    assert!(message.starts_with("Configuration validation failed: "));
    assert!(message.contains("; "));
}
