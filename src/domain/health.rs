use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health status enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Service is running and all dependencies are reachable
    Ready,
    /// Service is running but a dependency check failed
    NotReady,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Ready => write!(f, "ready"),
            HealthStatus::NotReady => write!(f, "not_ready"),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall readiness status
    pub status: HealthStatus,
    /// Per-dependency check results
    pub checks: Value,
}

impl HealthResponse {
    /// Create a new health response
    pub fn new(status: HealthStatus, checks: Value) -> Self {
        Self { status, checks }
    }

    /// Check if the service is ready to serve traffic
    pub fn is_ready(&self) -> bool {
        matches!(self.status, HealthStatus::Ready)
    }

    /// Get HTTP status code for the readiness status
    pub fn http_status_code(&self) -> u16 {
        match self.status {
            HealthStatus::Ready => 200,
            HealthStatus::NotReady => 503,
        }
    }
}
