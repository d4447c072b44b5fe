use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::fis::FisClient;

pub mod health;
pub mod sanctions;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub fis: FisClient,
}

pub fn router(state: AppState) -> Router {
    // The frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "FIS Sanctions API - v1.0" }))
        .route("/health", get(health::health_check))

        // Sanction endpoints
        .route("/api/sanctions", get(sanctions::get_sanctions))
        .route(
            "/api/sanctions/{discipline}/{season}",
            get(sanctions::get_discipline_sanctions),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
