use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, admin_only_middleware, AuthenticatedUser};
use crate::models::chauffeur::{Chauffeur, CompleteChauffeurProfileRequest};
use crate::models::client::{Client, CompleteClientProfileRequest};
use crate::models::profile::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de autenticación y perfil
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/me/client", post(complete_client_profile))
        .route("/me/chauffeur", post(complete_chauffeur_profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin = Router::new()
        .route("/invitations", post(create_invitation))
        .layer(middleware::from_fn(admin_only_middleware))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
        .merge(admin)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let response = controller.register(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let response = controller.login(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let response = controller.me(user.user_id).await?;
    Ok(Json(response))
}

async fn complete_client_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CompleteClientProfileRequest>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let client = controller
        .complete_client_profile(user.user_id, user.role, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        client,
        "Profil client complété".to_string(),
    )))
}

async fn complete_chauffeur_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CompleteChauffeurProfileRequest>,
) -> Result<Json<ApiResponse<Chauffeur>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let chauffeur = controller
        .complete_chauffeur_profile(user.user_id, user.role, request)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        chauffeur,
        "Profil chauffeur complété".to_string(),
    )))
}

async fn create_invitation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    let invitation = controller.create_invitation(user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "token": invitation.token,
        "expires_at": invitation.expires_at,
    })))
}
