//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::Settings;
use crate::shared::error::AppError;

/// Configuration validator for cross-field validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete settings snapshot
    pub fn validate_settings(settings: &Settings) -> crate::Result<()> {
        Self::validate_gateway_url(&settings.payment_gateway_url, settings.is_development())?;
        Self::validate_retry_settings(settings)?;
        Self::validate_redis_url(&settings.redis_url)?;
        Ok(())
    }

    /// Validate the payment gateway URL
    fn validate_gateway_url(url: &str, development: bool) -> crate::Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Validation(
                "Payment gateway URL must start with http:// or https://".to_string(),
            ));
        }

        let local = url.contains("localhost") || url.contains("127.0.0.1");
        if !development && !local && !url.starts_with("https://") {
            return Err(AppError::Validation(
                "Production payment gateway URL must use HTTPS".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the retry/backoff settings as a group
    fn validate_retry_settings(settings: &Settings) -> crate::Result<()> {
        if settings.initial_retry_delay > settings.max_retry_delay {
            return Err(AppError::Validation(
                "initial_retry_delay cannot be greater than max_retry_delay".to_string(),
            ));
        }

        if settings.max_retries > 0 && settings.initial_retry_delay <= 0.0 {
            return Err(AppError::Validation(
                "Retries enabled but initial_retry_delay is 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the Redis URL scheme
    fn validate_redis_url(url: &str) -> crate::Result<()> {
        if !url.starts_with("redis://") && !url.starts_with("rediss://") {
            return Err(AppError::Validation(
                "Redis URL must start with redis:// or rediss://".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RawConfig;

    fn settings_from(mutate: impl FnOnce(&mut RawConfig)) -> crate::Result<Settings> {
        let mut raw = RawConfig::new();
        raw.insert("database_url".to_string(), "postgres://x".to_string());
        raw.insert(
            "payment_gateway_url".to_string(),
            "http://localhost:9000".to_string(),
        );
        raw.insert("payment_gateway_api_key".to_string(), "abc123".to_string());
        mutate(&mut raw);
        Settings::from_map(&raw)
    }

    #[test]
    fn test_localhost_gateway_allowed_in_development() {
        assert!(settings_from(|_| {}).is_ok());
    }

    #[test]
    fn test_production_gateway_requires_https() {
        let result = settings_from(|raw| {
            raw.insert("environment".to_string(), "production".to_string());
            raw.insert(
                "payment_gateway_url".to_string(),
                "http://gateway.example.com".to_string(),
            );
        });

        let err = result.unwrap_err();
        assert!(err.to_string().contains("must use HTTPS"));
    }

    #[test]
    fn test_production_https_gateway_passes() {
        let result = settings_from(|raw| {
            raw.insert("environment".to_string(), "production".to_string());
            raw.insert(
                "payment_gateway_url".to_string(),
                "https://gateway.example.com".to_string(),
            );
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_initial_delay_greater_than_max_rejected() {
        let result = settings_from(|raw| {
            raw.insert("initial_retry_delay".to_string(), "60.0".to_string());
            raw.insert("max_retry_delay".to_string(), "5.0".to_string());
        });

        let err = result.unwrap_err();
        assert!(err
            .to_string()
            .contains("initial_retry_delay cannot be greater"));
    }

    #[test]
    fn test_zero_delay_with_retries_rejected() {
        let result = settings_from(|raw| {
            raw.insert("initial_retry_delay".to_string(), "0.0".to_string());
        });

        let err = result.unwrap_err();
        assert!(err.to_string().contains("initial_retry_delay is 0"));
    }

    #[test]
    fn test_invalid_redis_scheme_rejected() {
        let result = settings_from(|raw| {
            raw.insert("redis_url".to_string(), "http://localhost:6379".to_string());
        });

        let err = result.unwrap_err();
        assert!(err.to_string().contains("redis://"));
    }
}
