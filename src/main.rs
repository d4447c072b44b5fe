use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::fis::FisClient;
use crate::routes::AppState;

mod aggregator;
mod config;
mod error;
mod fis;
mod models;
mod routes;

#[cfg(test)]
mod test_utils;

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

    tracing::info!("Starting FIS sanctions proxy...");

    let config = Config::from_env().expect("Invalid configuration");

    let fis = FisClient::new(config.fis_base_url.clone(), config.fis_timeout)
        .expect("Failed to build FIS API client");

    tracing::info!("Proxying FIS API at {}", fis.base_url());

    let app = routes::router(AppState { fis });

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Backend proxy running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
