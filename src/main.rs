use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod models;
mod provider;
mod routes;
mod stats;

use config::Config;
use provider::NbaStatsClient;
use routes::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting stats proxy server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match NbaStatsClient::new(config.stats_base_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build stats client: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Proxying stats from {}", config.stats_base_url);

    let addr = config.addr();
    let app = routes::router(AppState::new(Arc::new(client)), config.cors_origins);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
