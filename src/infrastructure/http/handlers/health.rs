//! Health check handlers
//!
//! Liveness answers whether the process is running; readiness checks the
//! external collaborators (configuration, redis, payment gateway) before
//! declaring the service fit for traffic.

use std::sync::Arc;

use serde_json::Value;
use warp::Reply;

use crate::config::SettingsProvider;
use crate::domain::health::{HealthResponse, HealthStatus};
use crate::infrastructure::adapters::PaymentGateway;
use crate::shared::error::{AppError, AppResult};

/// Handle `GET /health/liveness`
pub async fn handle_liveness() -> Result<impl Reply, warp::reject::Rejection> {
    Ok(warp::reply::json(&serde_json::json!({"status": "alive"})))
}

/// Handle `GET /health/readiness`
pub async fn handle_readiness(
    provider: Arc<SettingsProvider>,
    gateway: Arc<dyn PaymentGateway>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let mut checks = serde_json::Map::new();

    let settings = match provider.get().await {
        Ok(settings) => {
            checks.insert("configuration".to_string(), Value::from("healthy"));
            Some(settings)
        }
        Err(e) => {
            checks.insert(
                "configuration".to_string(),
                Value::from(format!("unhealthy: {}", e)),
            );
            None
        }
    };

    if let Some(settings) = settings {
        let redis = match check_redis(&settings.redis_url).await {
            Ok(()) => Value::from("healthy"),
            Err(e) => Value::from(format!("unhealthy: {}", e)),
        };
        checks.insert("redis".to_string(), redis);

        let gateway_check = if gateway.is_available().await {
            Value::from("healthy")
        } else {
            Value::from("unhealthy: unreachable")
        };
        checks.insert("payment_gateway".to_string(), gateway_check);
    }

    let all_healthy = checks.values().all(|v| v.as_str() == Some("healthy"));
    let status = if all_healthy {
        HealthStatus::Ready
    } else {
        HealthStatus::NotReady
    };
    let response = HealthResponse::new(status, Value::Object(checks));

    let http_status = if response.is_ready() {
        warp::http::StatusCode::OK
    } else {
        warp::http::StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        http_status,
    ))
}

async fn check_redis(url: &str) -> AppResult<()> {
    let client =
        redis::Client::open(url).map_err(|e| AppError::Internal(format!("redis open: {}", e)))?;
    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("redis connect: {}", e)))?;
    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|e| AppError::Internal(format!("redis ping: {}", e)))?;
    Ok(())
}
