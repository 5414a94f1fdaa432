use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::directory_controller::DirectoryController;
use crate::middleware::auth::{admin_only_middleware, AuthenticatedUser};
use crate::models::chauffeur::Chauffeur;
use crate::models::client::Client;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas del directorio de clientes y chauffeurs
pub fn create_directory_router() -> Router<AppState> {
    let admin = Router::new()
        .route("/clients", get(list_clients))
        .route("/chauffeurs", get(list_chauffeurs))
        .layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .route("/clients/:id", get(get_client))
        .route("/chauffeurs/:id", get(get_chauffeur))
        .merge(admin)
}

async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let clients = controller.list_clients().await?;
    Ok(Json(clients))
}

async fn get_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let client = controller.get_client(user.user_id, user.role, id).await?;
    Ok(Json(client))
}

async fn list_chauffeurs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Chauffeur>>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let chauffeurs = controller.list_chauffeurs().await?;
    Ok(Json(chauffeurs))
}

async fn get_chauffeur(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Chauffeur>, AppError> {
    let controller = DirectoryController::new(state.pool.clone());
    let chauffeur = controller
        .get_chauffeur(user.user_id, user.role, id)
        .await?;
    Ok(Json(chauffeur))
}
