//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: missing required field `{field}`")]
    MissingConfigField { field: String },

    #[error("Configuration error: invalid value `{value}` for field `{field}` (expected {expected})")]
    InvalidConfigValue {
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> warp::http::StatusCode {
        match self {
            AppError::Validation(_) | AppError::Json(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => warp::http::StatusCode::NOT_FOUND,
            AppError::Conflict(_) => warp::http::StatusCode::CONFLICT,
            AppError::Gateway(_) => warp::http::StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::MissingConfigField { .. }
            | AppError::InvalidConfigValue { .. }
            | AppError::Http(_)
            | AppError::Internal(_) => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for any of the configuration error variants
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::MissingConfigField { .. }
                | AppError::InvalidConfigValue { .. }
        )
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

// Implement warp::reject::Reject for AppError
impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => AppError::MissingConfigField { field: key },
            config::ConfigError::Type {
                key,
                expected,
                unexpected,
                ..
            } => AppError::InvalidConfigValue {
                field: key.unwrap_or_default(),
                expected,
                value: unexpected.to_string(),
            },
            other => AppError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_the_field() {
        let err = AppError::MissingConfigField {
            field: "database_url".to_string(),
        };
        assert!(err.to_string().contains("database_url"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_value_message_names_field_and_expected_type() {
        let err = AppError::InvalidConfigValue {
            field: "max_retries".to_string(),
            expected: "integer",
            value: "notanumber".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("max_retries"));
        assert!(msg.contains("integer"));
        assert!(msg.contains("notanumber"));
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            AppError::NotFound("x".to_string()).http_status_code(),
            warp::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".to_string()).http_status_code(),
            warp::http::StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Gateway("x".to_string()).http_status_code(),
            warp::http::StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Config("x".to_string()).http_status_code(),
            warp::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
