use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::controllers::stats_controller::StatsController;
use crate::dto::stats_dto::{AdminDashboard, ChauffeurDashboard, ClientDashboard};
use crate::middleware::auth::{admin_only_middleware, AuthenticatedUser};
use crate::models::profile::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de dashboards por rol
pub fn create_stats_router() -> Router<AppState> {
    let admin = Router::new()
        .route("/admin", get(admin_dashboard))
        .layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .route("/client", get(client_dashboard))
        .route("/chauffeur", get(chauffeur_dashboard))
        .merge(admin)
}

async fn admin_dashboard(
    State(state): State<AppState>,
) -> Result<Json<AdminDashboard>, AppError> {
    let controller = StatsController::new(state.pool.clone());
    let dashboard = controller.admin_dashboard().await?;
    Ok(Json(dashboard))
}

async fn client_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ClientDashboard>, AppError> {
    if user.role != Role::Client {
        return Err(AppError::Forbidden(
            "client dashboard is reserved to client profiles".to_string(),
        ));
    }

    let controller = StatsController::new(state.pool.clone());
    let dashboard = controller.client_dashboard(user.user_id).await?;
    Ok(Json(dashboard))
}

async fn chauffeur_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ChauffeurDashboard>, AppError> {
    if user.role != Role::Chauffeur {
        return Err(AppError::Forbidden(
            "chauffeur dashboard is reserved to chauffeur profiles".to_string(),
        ));
    }

    let controller = StatsController::new(state.pool.clone());
    let dashboard = controller.chauffeur_dashboard(user.user_id).await?;
    Ok(Json(dashboard))
}
