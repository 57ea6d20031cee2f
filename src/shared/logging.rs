//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified default level
    pub fn initialize(level: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e))
        })?;

        Ok(())
    }

    /// Log an incoming API request with structured data
    pub fn log_request(request_id: &str, operation: &str, idempotency_key: Option<&str>) {
        info!(
            request_id = %request_id,
            operation = %operation,
            idempotency_key = idempotency_key,
            "Processing request"
        );
    }

    /// Log a successful response
    pub fn log_success(request_id: &str, operation: &str, duration_ms: u64) {
        info!(
            request_id = %request_id,
            operation = %operation,
            duration_ms = %duration_ms,
            "Request completed successfully"
        );
    }

    /// Log an error response
    pub fn log_error(
        request_id: &str,
        operation: &str,
        error: &crate::shared::error::AppError,
        duration_ms: u64,
    ) {
        error!(
            request_id = %request_id,
            operation = %operation,
            error = %error,
            duration_ms = %duration_ms,
            "Request failed"
        );
    }

    /// Log a retry attempt against an external collaborator
    pub fn log_retry(target: &str, attempt: u32, max_attempts: u32, delay_ms: u64) {
        warn!(
            target_service = %target,
            attempt = %attempt,
            max_attempts = %max_attempts,
            delay_ms = %delay_ms,
            "Retrying after failure"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        format!("req_{:x}", now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id_is_unique() {
        let a = LoggingUtils::generate_request_id();
        let b = LoggingUtils::generate_request_id();
        assert!(a.starts_with("req_"));
        assert_ne!(a, b);
    }
}
