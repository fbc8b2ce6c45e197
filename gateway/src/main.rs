//! Gateway main entry point.
//!
//! Builds the contract route table, registers the in-memory petstore
//! services, and serves HTTP until a shutdown signal arrives.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::{server, Gateway, GatewayConfig, Handlers};
use petstore_service::Petstore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = GatewayConfig::from_env();
    tracing::info!("Starting petstore gateway v{}", config.version);
    tracing::info!("HTTP server listening on {}", config.http_addr);

    // One in-memory store backs all three contract services
    let petstore = Arc::new(Petstore::new());
    let handlers = Handlers {
        pet: Some(petstore.clone()),
        store: Some(petstore.clone()),
        user: Some(petstore),
    };

    // Route table is built once here; an ambiguous contract is fatal
    let gateway = Arc::new(Gateway::new(config.clone(), handlers)?);
    let app = server::app(gateway);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
