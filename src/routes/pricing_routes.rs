use axum::{
    extract::State,
    middleware,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::pricing_controller::PricingController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::pricing_dto::{QuoteRequest, UpsertGridRequest};
use crate::middleware::auth::admin_only_middleware;
use crate::models::pricing::{PriceQuote, PricingGrid};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de tarificación; la gestión de la grilla es solo admin
pub fn create_pricing_router() -> Router<AppState> {
    let admin = Router::new()
        .route("/grids", get(list_grids))
        .route("/grids", put(upsert_grid))
        .layer(middleware::from_fn(admin_only_middleware));

    Router::new().route("/quote", post(quote)).merge(admin)
}

async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<PriceQuote>, AppError> {
    let controller = PricingController::new(state.pool.clone());
    let quote = controller.quote(request).await?;
    Ok(Json(quote))
}

async fn list_grids(
    State(state): State<AppState>,
) -> Result<Json<Vec<PricingGrid>>, AppError> {
    let controller = PricingController::new(state.pool.clone());
    let grids = controller.list_grids().await?;
    Ok(Json(grids))
}

async fn upsert_grid(
    State(state): State<AppState>,
    Json(request): Json<UpsertGridRequest>,
) -> Result<Json<ApiResponse<PricingGrid>>, AppError> {
    let controller = PricingController::new(state.pool.clone());
    let grid = controller.upsert_grid(request).await?;
    Ok(Json(ApiResponse::success(grid)))
}
