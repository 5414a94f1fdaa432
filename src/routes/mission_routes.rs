use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::mission_controller::MissionController;
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::mission::{
    CreateMissionRequest, MissionFilters, MissionResponse, MissionStatusHistory,
    TransitionMissionRequest, UpdateMissionRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de misiones (todas requieren autenticación; el router padre
/// aplica el middleware)
pub fn create_mission_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_mission))
        .route("/", get(list_missions))
        .route("/:id", get(get_mission))
        .route("/:id", put(update_mission))
        .route("/:id/transition", post(transition_mission))
        .route("/:id/cancel", post(cancel_mission))
        .route("/:id/history", get(mission_history))
        .route("/:id/paid", put(set_paid))
}

async fn create_mission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateMissionRequest>,
) -> Result<Json<ApiResponse<MissionResponse>>, AppError> {
    let controller = MissionController::new(&state);
    let mission = controller.create(&user.actor(), request).await?;
    Ok(Json(ApiResponse::success_with_message(
        mission.into(),
        "Mission créée".to_string(),
    )))
}

async fn list_missions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<MissionFilters>,
) -> Result<Json<Vec<MissionResponse>>, AppError> {
    let controller = MissionController::new(&state);
    let missions = controller.list(&user.actor(), filters).await?;
    Ok(Json(missions.into_iter().map(Into::into).collect()))
}

async fn get_mission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MissionResponse>, AppError> {
    let controller = MissionController::new(&state);
    let mission = controller.get(&user.actor(), id).await?;
    Ok(Json(mission.into()))
}

async fn update_mission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMissionRequest>,
) -> Result<Json<ApiResponse<MissionResponse>>, AppError> {
    let controller = MissionController::new(&state);
    let mission = controller.update(&user.actor(), id, request).await?;
    Ok(Json(ApiResponse::success(mission.into())))
}

async fn transition_mission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionMissionRequest>,
) -> Result<Json<ApiResponse<MissionResponse>>, AppError> {
    let controller = MissionController::new(&state);
    let mission = controller.transition(&user.actor(), id, request).await?;
    Ok(Json(ApiResponse::success(mission.into())))
}

#[derive(Debug, Deserialize)]
struct CancelRequest {
    notes: Option<String>,
}

async fn cancel_mission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelRequest>,
) -> Result<Json<ApiResponse<MissionResponse>>, AppError> {
    let controller = MissionController::new(&state);
    let mission = controller.cancel(&user.actor(), id, request.notes).await?;
    Ok(Json(ApiResponse::success_with_message(
        mission.into(),
        "Mission annulée".to_string(),
    )))
}

async fn mission_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MissionStatusHistory>>, AppError> {
    let controller = MissionController::new(&state);
    let history = controller.history(&user.actor(), id).await?;
    Ok(Json(history))
}

#[derive(Debug, Deserialize)]
struct SetPaidRequest {
    paid: bool,
}

async fn set_paid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPaidRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MissionController::new(&state);
    controller.set_paid(&user.actor(), id, request.paid).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "paid": request.paid,
    })))
}
