//! Application settings schema
//!
//! The settings schema is a fixed set of named fields with declared types
//! and optional defaults. Raw configuration is collected as a string-to-string
//! mapping from an optional `Settings.toml` file and `PAYMENT_API`-prefixed
//! environment variables (environment wins), then coerced and validated by
//! the pure [`Settings::from_map`] function.

use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;
use validator::Validate;

/// Raw configuration as read from the external source
pub type RawConfig = HashMap<String, String>;

/// Validated application settings for one process lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// Deployment environment name
    #[validate(length(min = 1))]
    pub environment: String,

    /// Debug mode
    pub debug: bool,

    /// Human-readable service name
    #[validate(length(min = 1))]
    pub app_name: String,

    /// Default log level when RUST_LOG is not set
    #[validate(length(min = 1))]
    pub log_level: String,

    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Database connection string
    #[validate(length(min = 1))]
    pub database_url: String,

    /// Redis connection URL
    #[validate(length(min = 1))]
    pub redis_url: String,

    /// Payment gateway base URL
    #[validate(url)]
    pub payment_gateway_url: String,

    /// Payment gateway API key
    #[validate(length(min = 1))]
    pub payment_gateway_api_key: String,

    /// Payment gateway request timeout in seconds
    #[validate(range(min = 0.1, max = 300.0))]
    pub payment_gateway_timeout: f64,

    /// Maximum retry attempts against external services
    #[validate(range(max = 10))]
    pub max_retries: u32,

    /// Initial retry delay in seconds
    #[validate(range(min = 0.0, max = 60.0))]
    pub initial_retry_delay: f64,

    /// Maximum retry delay in seconds
    #[validate(range(min = 0.0, max = 600.0))]
    pub max_retry_delay: f64,

    /// Exponential backoff multiplier
    #[validate(range(min = 1.0, max = 10.0))]
    pub backoff_multiplier: f64,
}

impl Settings {
    /// Load settings from the external configuration source.
    ///
    /// The source is consulted exactly once per call: an optional
    /// `Settings.toml` file overlaid with `PAYMENT_API`-prefixed environment
    /// variables, flattened to raw string values.
    pub fn load() -> AppResult<Self> {
        let source = config::Config::builder()
            .add_source(config::File::with_name("Settings").required(false))
            .add_source(config::Environment::with_prefix("PAYMENT_API"))
            .build()?;

        let raw: RawConfig = source.try_deserialize()?;
        Self::from_map(&raw)
    }

    /// Coerce and validate a raw key/value mapping into a settings snapshot.
    ///
    /// Pure with respect to the process environment: all input comes from
    /// `raw`, all failure modes are structured errors naming the offending
    /// field and its expected type. Absent optional fields take their
    /// schema defaults; absent required fields are an error.
    pub fn from_map(raw: &RawConfig) -> AppResult<Self> {
        let settings = Self {
            environment: optional_string(raw, "environment", "development"),
            debug: optional(raw, "debug", "boolean", false, parse_bool)?,
            app_name: optional_string(raw, "app_name", "Payment Service"),
            log_level: optional_string(raw, "log_level", "info"),
            bind_address: optional(raw, "bind_address", "IP address", IpAddr::from([127, 0, 0, 1]), parse_from_str)?,
            port: optional(raw, "port", "integer", 8080, parse_from_str)?,
            database_url: required(raw, "database_url")?,
            redis_url: optional_string(raw, "redis_url", "redis://localhost:6379/0"),
            payment_gateway_url: required(raw, "payment_gateway_url")?,
            payment_gateway_api_key: required(raw, "payment_gateway_api_key")?,
            payment_gateway_timeout: optional(raw, "payment_gateway_timeout", "number", 10.0, parse_from_str)?,
            max_retries: optional(raw, "max_retries", "integer", 3, parse_from_str)?,
            initial_retry_delay: optional(raw, "initial_retry_delay", "number", 1.0, parse_from_str)?,
            max_retry_delay: optional(raw, "max_retry_delay", "number", 30.0, parse_from_str)?,
            backoff_multiplier: optional(raw, "backoff_multiplier", "number", 2.0, parse_from_str)?,
        };

        settings
            .validate()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;

        crate::config::ConfigValidator::validate_settings(&settings)?;

        Ok(settings)
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Whether this deployment runs in a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn required(raw: &RawConfig, field: &'static str) -> AppResult<String> {
    raw.get(field).cloned().ok_or(AppError::MissingConfigField {
        field: field.to_string(),
    })
}

fn optional_string(raw: &RawConfig, field: &str, default: &str) -> String {
    raw.get(field).cloned().unwrap_or_else(|| default.to_string())
}

fn optional<T>(
    raw: &RawConfig,
    field: &'static str,
    expected: &'static str,
    default: T,
    parse: fn(&str) -> Option<T>,
) -> AppResult<T> {
    match raw.get(field) {
        Some(value) => parse(value).ok_or(AppError::InvalidConfigValue {
            field: field.to_string(),
            expected,
            value: value.clone(),
        }),
        None => Ok(default),
    }
}

fn parse_from_str<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_raw() -> RawConfig {
        let mut raw = RawConfig::new();
        raw.insert("database_url".to_string(), "postgres://x".to_string());
        raw.insert(
            "payment_gateway_url".to_string(),
            "http://localhost:9000".to_string(),
        );
        raw.insert("payment_gateway_api_key".to_string(), "abc123".to_string());
        raw
    }

    #[test]
    fn test_minimal_config_applies_defaults() {
        let settings = Settings::from_map(&minimal_raw()).unwrap();

        assert_eq!(settings.database_url, "postgres://x");
        assert_eq!(settings.payment_gateway_api_key, "abc123");
        assert!(!settings.debug);
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.app_name, "Payment Service");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.redis_url, "redis://localhost:6379/0");
        assert!((settings.payment_gateway_timeout - 10.0).abs() < f64::EPSILON);
        assert_eq!(settings.max_retries, 3);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let mut raw = minimal_raw();
        raw.remove("database_url");

        let err = Settings::from_map(&raw).unwrap_err();
        match err {
            AppError::MissingConfigField { field } => assert_eq!(field, "database_url"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_boolean_coercion_from_string() {
        let mut raw = minimal_raw();
        raw.insert("debug".to_string(), "true".to_string());
        assert!(Settings::from_map(&raw).unwrap().debug);

        raw.insert("debug".to_string(), "0".to_string());
        assert!(!Settings::from_map(&raw).unwrap().debug);
    }

    #[test]
    fn test_invalid_boolean_is_an_error() {
        let mut raw = minimal_raw();
        raw.insert("debug".to_string(), "maybe".to_string());

        let err = Settings::from_map(&raw).unwrap_err();
        match err {
            AppError::InvalidConfigValue {
                field, expected, ..
            } => {
                assert_eq!(field, "debug");
                assert_eq!(expected, "boolean");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_integer_is_an_error() {
        let mut raw = minimal_raw();
        raw.insert("max_retries".to_string(), "notanumber".to_string());

        let err = Settings::from_map(&raw).unwrap_err();
        match err {
            AppError::InvalidConfigValue {
                field,
                expected,
                value,
            } => {
                assert_eq!(field, "max_retries");
                assert_eq!(expected, "integer");
                assert_eq!(value, "notanumber");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_out_of_range_value_fails_validation() {
        let mut raw = minimal_raw();
        raw.insert("backoff_multiplier".to_string(), "0.5".to_string());

        let err = Settings::from_map(&raw).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_coercion_does_not_depend_on_insertion_order() {
        let a = Settings::from_map(&minimal_raw()).unwrap();
        let b = Settings::from_map(&minimal_raw()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_server_address() {
        let mut raw = minimal_raw();
        raw.insert("bind_address".to_string(), "0.0.0.0".to_string());
        raw.insert("port".to_string(), "9090".to_string());

        let settings = Settings::from_map(&raw).unwrap();
        assert_eq!(settings.server_address(), "0.0.0.0:9090");
    }
}
