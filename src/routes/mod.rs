//! Ensamblado del router de la aplicación

pub mod auth_routes;
pub mod directory_routes;
pub mod document_routes;
pub mod mission_routes;
pub mod pricing_routes;
pub mod stats_routes;

use axum::{middleware, routing::get, Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Construir el router completo con middleware de autenticación y CORS
pub fn create_router(state: AppState) -> Router {
    let authenticated = Router::new()
        .nest("/missions", mission_routes::create_mission_router())
        .nest("/documents", document_routes::create_document_router())
        .nest("/pricing", pricing_routes::create_pricing_router())
        .nest("/stats", stats_routes::create_stats_router())
        .nest("/directory", directory_routes::create_directory_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes::create_auth_router(state.clone()))
        .merge(authenticated)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "dk_automotive",
    }))
}
