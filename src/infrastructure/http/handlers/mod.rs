//! HTTP request handlers

pub mod health;
pub mod orders;
pub mod payments;

pub use health::{handle_liveness, handle_readiness};
pub use orders::{handle_create_order, handle_get_order};
pub use payments::{handle_create_payment, handle_get_payment};

use crate::config::SettingsProvider;
use crate::shared::error::AppError;
use std::sync::Arc;
use warp::Reply;

/// Handle `GET /` - welcome document
pub async fn handle_root(
    provider: Arc<SettingsProvider>,
) -> Result<impl Reply, warp::reject::Rejection> {
    match provider.get().await {
        Ok(settings) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "message": format!("Welcome to {}", settings.app_name),
                "health": "/health/liveness",
            })),
            warp::http::StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(&e)),
    }
}

/// JSON error body returned to clients
pub(crate) fn error_body(error: &AppError) -> serde_json::Value {
    serde_json::json!({ "error": error.to_string() })
}

/// Uniform error reply with the error's HTTP status
pub(crate) fn error_reply(error: &AppError) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&error_body(error)),
        error.http_status_code(),
    )
}
