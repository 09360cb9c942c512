//! Registration server - entry point.

use registration_server::{
    api::{create_router, AppState},
    config::{Config, StorageBackend},
};
use registration_store::Store;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting registration server");

    // Initialize the store from configuration
    let store = match config.storage.backend {
        StorageBackend::File => Store::file(&config.storage.file_path).await,
        StorageBackend::Mongo => {
            Store::mongo(
                &config.storage.mongo_uri,
                &config.storage.mongo_database,
                &config.storage.mongo_collection,
            )
            .await
        }
    };

    let store = match store {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize registration store: {}", e);
            std::process::exit(1);
        }
    };

    match store.count().await {
        Ok(n) => info!("Store ready with {} registrations", n),
        Err(e) => error!("Store is reachable but unreadable: {}", e),
    }

    // Create application state and router
    let state = AppState::new(store);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
