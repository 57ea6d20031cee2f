//! Orders HTTP handlers

use std::sync::Arc;
use std::time::Instant;

use warp::Reply;

use crate::application::services::order_service::{OrderRequest, OrderService};
use crate::config::SettingsProvider;
use crate::shared::logging::LoggingUtils;

use super::error_reply;

/// Handle `POST /api/orders`
pub async fn handle_create_order(
    body: OrderRequest,
    idempotency_key: Option<String>,
    service: Arc<OrderService>,
    provider: Arc<SettingsProvider>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let started = Instant::now();
    let request_id = LoggingUtils::generate_request_id();

    let settings = match provider.get().await {
        Ok(settings) => settings,
        Err(e) => return Ok(error_reply(&e)),
    };

    let mut request = body;
    if idempotency_key.is_some() {
        request.idempotency_key = idempotency_key;
    }

    if settings.debug {
        LoggingUtils::log_request(
            &request_id,
            "orders.create",
            request.idempotency_key.as_deref(),
        );
    }

    match service.create_order(request).await {
        Ok(response) => {
            LoggingUtils::log_success(
                &request_id,
                "orders.create",
                started.elapsed().as_millis() as u64,
            );
            Ok(warp::reply::with_status(
                warp::reply::json(&response),
                warp::http::StatusCode::CREATED,
            ))
        }
        Err(e) => {
            LoggingUtils::log_error(
                &request_id,
                "orders.create",
                &e,
                started.elapsed().as_millis() as u64,
            );
            Ok(error_reply(&e))
        }
    }
}

/// Handle `GET /api/orders/:id`
pub async fn handle_get_order(
    order_id: String,
    service: Arc<OrderService>,
    provider: Arc<SettingsProvider>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if let Err(e) = provider.get().await {
        return Ok(error_reply(&e));
    }

    match service.get_order(&order_id).await {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&response),
            warp::http::StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(&e)),
    }
}
