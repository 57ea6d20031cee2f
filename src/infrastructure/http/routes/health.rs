//! Health routes

use std::sync::Arc;
use warp::Filter;

use crate::config::SettingsProvider;
use crate::infrastructure::adapters::PaymentGateway;
use crate::infrastructure::http::handlers::{handle_liveness, handle_readiness};

pub struct HealthRoutes;

impl HealthRoutes {
    pub fn create_routes(
        provider: Arc<SettingsProvider>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let liveness = warp::path("health")
            .and(warp::path("liveness"))
            .and(warp::path::end())
            .and(warp::get())
            .and_then(handle_liveness);

        let readiness = warp::path("health")
            .and(warp::path("readiness"))
            .and(warp::path::end())
            .and(warp::get())
            .and(Self::with_provider(provider))
            .and(Self::with_gateway(gateway))
            .and_then(handle_readiness);

        liveness.or(readiness)
    }

    fn with_provider(
        provider: Arc<SettingsProvider>,
    ) -> impl Filter<Extract = (Arc<SettingsProvider>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || provider.clone())
    }

    fn with_gateway(
        gateway: Arc<dyn PaymentGateway>,
    ) -> impl Filter<Extract = (Arc<dyn PaymentGateway>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || gateway.clone())
    }
}
