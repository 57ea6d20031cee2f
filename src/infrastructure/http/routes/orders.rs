//! Orders routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::order_service::OrderService;
use crate::config::SettingsProvider;
use crate::infrastructure::http::handlers::{handle_create_order, handle_get_order};

use super::MAX_REQUEST_SIZE;

pub struct OrdersRoutes;

impl OrdersRoutes {
    pub fn create_routes(
        provider: Arc<SettingsProvider>,
        service: Arc<OrderService>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let create = warp::path("api")
            .and(warp::path("orders"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_REQUEST_SIZE))
            .and(warp::body::json())
            .and(warp::header::optional::<String>("idempotency-key"))
            .and(Self::with_service(service.clone()))
            .and(Self::with_provider(provider.clone()))
            .and_then(handle_create_order);

        let get = warp::path("api")
            .and(warp::path("orders"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(Self::with_service(service))
            .and(Self::with_provider(provider))
            .and_then(handle_get_order);

        create.or(get)
    }

    fn with_service(
        service: Arc<OrderService>,
    ) -> impl Filter<Extract = (Arc<OrderService>,), Error = std::convert::Infallible> + Clone
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
    use crate::application::services::PaymentService;
    use crate::config::Settings;
    use crate::infrastructure::adapters::{OrdersStore, PaymentsStore};
    use crate::workers::tasks::ConfirmationWorker;

    fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let settings = test_settings();
        let payments = Arc::new(PaymentService::new(
            settings.clone(),
            StubGateway::succeeding(),
            Arc::new(PaymentsStore::new(None)),
        ));
        let worker = ConfirmationWorker::spawn(settings.clone());
        let service = Arc::new(OrderService::new(
            payments,
            Arc::new(OrdersStore::new(None)),
            worker.sender(),
        ));
        let provider = Arc::new(SettingsProvider::with_loader(move || {
            Ok(Settings::clone(&settings))
        }));
        OrdersRoutes::create_routes(provider, service)
    }

    #[tokio::test]
    async fn test_create_order_returns_201() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/orders")
            .json(&serde_json::json!({
                "user_id": 1,
                "total": 49.99,
                "currency": "USD",
                "items": "[{\"product\":\"Widget\",\"qty\":2}]"
            }))
            .reply(&routes())
            .await;

        assert_eq!(response.status(), 201);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "confirmed");
        assert!(body["payment_id"].is_string());
    }

    #[tokio::test]
    async fn test_missing_items_rejected() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/orders")
            .json(&serde_json::json!({
                "user_id": 1,
                "total": 49.99
            }))
            .reply(&routes())
            .await;

        assert_eq!(response.status(), 400);
    }
}
