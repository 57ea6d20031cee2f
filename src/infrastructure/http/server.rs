//! HTTP server wiring
//!
//! Wires the adapters, services, and worker together and serves the route
//! tree. Intended to run behind a reverse proxy handling TLS and CORS.

use crate::application::services::{OrderService, PaymentService};
use crate::config::{Settings, SettingsProvider};
use crate::infrastructure::adapters::{
    HttpPaymentGateway, OrdersStore, PaymentGateway, PaymentsStore,
};
use crate::infrastructure::http::routes::RouteBuilder;
use crate::shared::error::{AppError, AppResult};
use crate::workers::tasks::ConfirmationWorker;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use warp::{Filter, Reply};

/// Main server implementation
pub struct HttpServer {
    provider: Arc<SettingsProvider>,
    settings: Arc<Settings>,
    payments: Arc<PaymentService>,
    orders: Arc<OrderService>,
    gateway: Arc<dyn PaymentGateway>,
    worker: ConfirmationWorker,
}

impl HttpServer {
    /// Create a new server instance.
    ///
    /// This is the first access to the settings provider: it populates the
    /// cache slot, so an invalid configuration fails startup here.
    pub async fn new(provider: Arc<SettingsProvider>) -> AppResult<Self> {
        let settings = provider.get().await?;

        let redis = Self::connect_redis(&settings).await;
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(HttpPaymentGateway::new(settings.clone()));

        let payments = Arc::new(PaymentService::new(
            settings.clone(),
            gateway.clone(),
            Arc::new(PaymentsStore::new(redis.clone())),
        ));

        let worker = ConfirmationWorker::spawn(settings.clone());
        let orders = Arc::new(OrderService::new(
            payments.clone(),
            Arc::new(OrdersStore::new(redis)),
            worker.sender(),
        ));

        Ok(Self {
            provider,
            settings,
            payments,
            orders,
            gateway,
            worker,
        })
    }

    /// Get a reference to the settings snapshot
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the server
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.settings.server_address();
        info!("Starting server on {}", addr);

        let addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        // The worker must outlive the serve loop
        let worker = self.worker;
        let routes = RouteBuilder::build_routes(
            self.provider,
            self.payments,
            self.orders,
            self.gateway,
        );

        warp::serve(routes).run(addr).await;

        worker.shutdown().await;
        Ok(())
    }

    /// Create the application routes
    pub fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        RouteBuilder::build_routes(
            self.provider.clone(),
            self.payments.clone(),
            self.orders.clone(),
            self.gateway.clone(),
        )
    }

    async fn connect_redis(
        settings: &Settings,
    ) -> Option<Arc<redis::aio::ConnectionManager>> {
        let client = match redis::Client::open(settings.redis_url.as_str()) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "Invalid redis URL, store runs in-memory only");
                return None;
            }
        };

        match redis::aio::ConnectionManager::new(client).await {
            Ok(manager) => Some(Arc::new(manager)),
            Err(e) => {
                warn!(error = %e, "Redis unavailable, store runs in-memory only");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RawConfig;

    fn test_provider() -> Arc<SettingsProvider> {
        Arc::new(SettingsProvider::with_loader(|| {
            let mut raw = RawConfig::new();
            raw.insert("database_url".to_string(), "postgres://x".to_string());
            raw.insert(
                "payment_gateway_url".to_string(),
                "http://localhost:9000".to_string(),
            );
            raw.insert("payment_gateway_api_key".to_string(), "abc123".to_string());
            // Unroutable redis port keeps the wiring in-memory in tests
            raw.insert("redis_url".to_string(), "redis://127.0.0.1:1".to_string());
            Settings::from_map(&raw)
        }))
    }

    #[tokio::test]
    async fn test_startup_populates_the_cache_slot() {
        let provider = test_provider();
        assert!(!provider.is_loaded());

        let server = HttpServer::new(provider.clone()).await.unwrap();
        assert!(provider.is_loaded());
        assert_eq!(server.settings().app_name, "Payment Service");
    }

    #[tokio::test]
    async fn test_liveness_route() {
        let server = HttpServer::new(test_provider()).await.unwrap();
        let routes = server.create_routes();

        let response = warp::test::request()
            .method("GET")
            .path("/health/liveness")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "alive");
    }

    #[tokio::test]
    async fn test_root_route_uses_settings() {
        let server = HttpServer::new(test_provider()).await.unwrap();
        let routes = server.create_routes();

        let response = warp::test::request().method("GET").path("/").reply(&routes).await;

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["message"], "Welcome to Payment Service");
    }
}
