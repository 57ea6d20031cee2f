//! Route composition

pub mod health;
pub mod orders;
pub mod payments;

use std::sync::Arc;
use warp::Filter;

use crate::application::services::{OrderService, PaymentService};
use crate::config::SettingsProvider;
use crate::infrastructure::adapters::PaymentGateway;
use crate::infrastructure::http::handlers::handle_root;

pub use health::HealthRoutes;
pub use orders::OrdersRoutes;
pub use payments::PaymentsRoutes;

/// Maximum accepted request body size
pub(crate) const MAX_REQUEST_SIZE: u64 = 1024 * 1024;

/// Builds the complete route tree
pub struct RouteBuilder;

impl RouteBuilder {
    pub fn build_routes(
        provider: Arc<SettingsProvider>,
        payments: Arc<PaymentService>,
        orders: Arc<OrderService>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let root = {
            let provider = provider.clone();
            warp::path::end()
                .and(warp::get())
                .and(warp::any().map(move || provider.clone()))
                .and_then(handle_root)
        };

        root.or(HealthRoutes::create_routes(provider.clone(), gateway))
            .or(PaymentsRoutes::create_routes(provider.clone(), payments))
            .or(OrdersRoutes::create_routes(provider, orders))
    }
}
