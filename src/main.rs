use payment_api::shared::logging::LoggingUtils;
use payment_api::{HttpServer, SettingsProvider};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging before anything else
    if let Err(e) = LoggingUtils::initialize("info") {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Payment API...");

    // The provider is the single cache slot for settings; handlers receive
    // it by injection and the first access below populates it.
    let provider = Arc::new(SettingsProvider::new());

    let server = match HttpServer::new(provider).await {
        Ok(server) => {
            info!("Server initialized successfully");
            server
        }
        Err(e) => {
            error!("Failed to initialize server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}", server.settings().server_address());

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
