//! Payments routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::payment_service::PaymentService;
use crate::config::SettingsProvider;
use crate::infrastructure::http::handlers::{handle_create_payment, handle_get_payment};

use super::MAX_REQUEST_SIZE;

pub struct PaymentsRoutes;

impl PaymentsRoutes {
    pub fn create_routes(
        provider: Arc<SettingsProvider>,
        service: Arc<PaymentService>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let create = warp::path("api")
            .and(warp::path("payments"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_REQUEST_SIZE))
            .and(warp::body::json())
            .and(warp::header::optional::<String>("idempotency-key"))
            .and(Self::with_service(service.clone()))
            .and(Self::with_provider(provider.clone()))
            .and_then(handle_create_payment);

        let get = warp::path("api")
            .and(warp::path("payments"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(Self::with_service(service))
            .and(Self::with_provider(provider))
            .and_then(handle_get_payment);

        create.or(get)
    }

    fn with_service(
        service: Arc<PaymentService>,
    ) -> impl Filter<Extract = (Arc<PaymentService>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || service.clone())
    }

    fn with_provider(
        provider: Arc<SettingsProvider>,
    ) -> impl Filter<Extract = (Arc<SettingsProvider>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || provider.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::payment_service::tests::{test_settings, StubGateway};
    use crate::infrastructure::adapters::PaymentsStore;
    use crate::config::Settings;

    fn routes(
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let settings = test_settings();
        let service = Arc::new(PaymentService::new(
            settings.clone(),
            StubGateway::succeeding(),
            Arc::new(PaymentsStore::new(None)),
        ));
        let provider = Arc::new(SettingsProvider::with_loader(move || {
            Ok(Settings::clone(&settings))
        }));
        PaymentsRoutes::create_routes(provider, service)
    }

    #[tokio::test]
    async fn test_create_payment_returns_201() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/payments")
            .json(&serde_json::json!({
                "user_id": 1,
                "amount": 99.99,
                "currency": "USD"
            }))
            .reply(&routes())
            .await;

        assert_eq!(response.status(), 201);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "completed");
        assert_eq!(body["transaction_id"], "txn_1");
    }

    #[tokio::test]
    async fn test_idempotency_key_header_wins() {
        let filter = routes();

        let first = warp::test::request()
            .method("POST")
            .path("/api/payments")
            .header("idempotency-key", "abc123")
            .json(&serde_json::json!({
                "user_id": 1,
                "amount": 10.0,
                "idempotency_key": "from-body"
            }))
            .reply(&filter)
            .await;
        assert_eq!(first.status(), 201);

        let body: serde_json::Value = serde_json::from_slice(first.body()).unwrap();
        assert_eq!(body["idempotency_key"], "abc123");
    }

    #[tokio::test]
    async fn test_invalid_body_rejected() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/payments")
            .json(&serde_json::json!({
                "user_id": 1,
                "amount": -5.0
            }))
            .reply(&routes())
            .await;

        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_get_unknown_payment_is_404() {
        let response = warp::test::request()
            .method("GET")
            .path("/api/payments/does-not-exist")
            .reply(&routes())
            .await;

        assert_eq!(response.status(), 404);
    }
}
