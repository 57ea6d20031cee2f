//! Payments HTTP handlers

use std::sync::Arc;
use std::time::Instant;

use warp::Reply;

use crate::application::services::payment_service::{PaymentRequest, PaymentService};
use crate::config::SettingsProvider;
use crate::shared::logging::LoggingUtils;

use super::error_reply;

/// Handle `POST /api/payments`
pub async fn handle_create_payment(
    body: PaymentRequest,
    idempotency_key: Option<String>,
    service: Arc<PaymentService>,
    provider: Arc<SettingsProvider>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let started = Instant::now();
    let request_id = LoggingUtils::generate_request_id();

    // The settings snapshot is injected per request; after the first call
    // this is a cache hit.
    let settings = match provider.get().await {
        Ok(settings) => settings,
        Err(e) => return Ok(error_reply(&e)),
    };

    let mut request = body;
    // Header-provided idempotency key wins over the body
    if idempotency_key.is_some() {
        request.idempotency_key = idempotency_key;
    }

    if settings.debug {
        LoggingUtils::log_request(
            &request_id,
            "payments.create",
            request.idempotency_key.as_deref(),
        );
    }

    match service.process_payment(request).await {
        Ok(response) => {
            LoggingUtils::log_success(
                &request_id,
                "payments.create",
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
                "payments.create",
                &e,
                started.elapsed().as_millis() as u64,
            );
            Ok(error_reply(&e))
        }
    }
}

/// Handle `GET /api/payments/:id`
pub async fn handle_get_payment(
    payment_id: String,
    service: Arc<PaymentService>,
    provider: Arc<SettingsProvider>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if let Err(e) = provider.get().await {
        return Ok(error_reply(&e));
    }

    match service.get_payment(&payment_id).await {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&response),
            warp::http::StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(&e)),
    }
}
