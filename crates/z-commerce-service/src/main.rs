//! z-commerce service entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use z_commerce_service::{create_router, AppState, ServiceConfig};
use z_commerce_store::{DocumentStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,z_commerce=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting z-commerce service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = ?config.data_dir,
        cors_origins = ?config.cors_origins,
        "Service configuration loaded"
    );

    let store = open_store(&config)?;
    let state = AppState::new(store, config.clone());
    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "rocksdb-backend")]
fn open_store(config: &ServiceConfig) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    match &config.data_dir {
        Some(path) => {
            tracing::info!(path = %path, "Opening RocksDB store");
            Ok(Arc::new(z_commerce_store::RocksStore::open(path)?))
        }
        None => {
            tracing::warn!("DATA_DIR not set - records are kept in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_store(config: &ServiceConfig) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    if config.data_dir.is_some() {
        tracing::warn!("Built without rocksdb-backend - DATA_DIR ignored, records are kept in memory");
    }
    Ok(Arc::new(MemoryStore::new()))
}
