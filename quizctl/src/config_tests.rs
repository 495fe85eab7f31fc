use crate::config::{Config, Environment};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::PathBuf;

fn config_with(environment: Environment, vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_vars(environment, |key| vars.get(key).cloned())
}

#[test]
fn test_environment_parsing() {
    assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
    assert_eq!("TEST".parse::<Environment>().unwrap(), Environment::Test);
    assert_eq!("Prod".parse::<Environment>().unwrap(), Environment::Production);
    assert!("staging".parse::<Environment>().is_err());
}

#[test]
fn test_environment_default() {
    assert_eq!(Environment::default(), Environment::Development);
}

#[test]
fn test_development_defaults() {
    let config = config_with(Environment::Development, &[]);
    assert_eq!(config.api.base_url, "http://localhost:8080/api");
    assert_eq!(config.api.token, None);
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.export_dir, PathBuf::from("."));
    assert_eq!(config.log_filter, "info");
    assert!(config.is_development());
    assert!(config.validate().is_ok());
}

#[test]
fn test_custom_variables() {
    let config = config_with(
        Environment::Test,
        &[
            ("QUIZDASH_API_URL", "http://api.internal:9000/v2"),
            ("QUIZDASH_API_TOKEN", "abc"),
            ("QUIZDASH_API_TIMEOUT", "5"),
            ("QUIZ_EXPORT_DIR", "/tmp/quizzes"),
            ("RUST_LOG", "debug"),
        ],
    );
    assert_eq!(config.api.base_url, "http://api.internal:9000/v2");
    assert_eq!(config.api.token.as_deref(), Some("abc"));
    assert_eq!(config.api.timeout_seconds, 5);
    assert_eq!(config.export_dir, PathBuf::from("/tmp/quizzes"));
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn test_invalid_timeout_falls_back_to_default() {
    let config = config_with(Environment::Development, &[("QUIZDASH_API_TIMEOUT", "soon")]);
    assert_eq!(config.api.timeout_seconds, 30);
}

#[test]
fn test_blank_token_is_ignored() {
    let config = config_with(Environment::Development, &[("QUIZDASH_API_TOKEN", "  ")]);
    assert_eq!(config.api.token, None);
}

#[test]
fn test_invalid_url_is_rejected() {
    let config = config_with(Environment::Development, &[("QUIZDASH_API_URL", "not a url")]);
    assert!(config.validate().is_err());
}

#[test]
fn test_production_requires_https_and_token() {
    let config = config_with(
        Environment::Production,
        &[("QUIZDASH_API_URL", "http://api.example.com"), ("QUIZDASH_API_TOKEN", "t")],
    );
    assert!(config.validate().is_err());

    let config = config_with(
        Environment::Production,
        &[("QUIZDASH_API_URL", "https://api.example.com")],
    );
    assert!(config.validate().is_err());

    let config = config_with(
        Environment::Production,
        &[("QUIZDASH_API_URL", "https://api.example.com"), ("QUIZDASH_API_TOKEN", "t")],
    );
    assert!(config.validate().is_ok());
    assert!(config.is_production());
}

#[test]
fn test_token_override() {
    let config = config_with(Environment::Development, &[("QUIZDASH_API_TOKEN", "from-env")]);
    assert_eq!(config.api_token(None).unwrap().as_str(), "from-env");
    assert_eq!(config.api_token(Some("from-flag")).unwrap().as_str(), "from-flag");

    let config = config_with(Environment::Development, &[]);
    assert!(config.api_token(None).is_none());
}

#[test]
fn test_debug_output_hides_token() {
    let config = config_with(Environment::Development, &[("QUIZDASH_API_TOKEN", "s3cret")]);
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("s3cret"));
}
