use axum::{
    extract::{Multipart, Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::document_controller::{DocumentController, UploadedFile};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::document::{DocumentResponse, DocumentType};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de documentos y uploads
pub fn create_document_router() -> Router<AppState> {
    Router::new()
        .route("/missions/:id/attachments", post(upload_mission_attachment))
        .route("/missions/:id/attachments", get(list_mission_documents))
        .route("/missions/:id/invoice", post(upload_chauffeur_invoice))
        .route("/chauffeurs/:id", post(upload_chauffeur_document))
        .route("/chauffeurs/:id", get(list_chauffeur_documents))
        .route("/:id", delete(delete_document))
}

/// Extraer el primer campo de archivo de un multipart, junto con un campo
/// `doc_type` opcional
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(Option<DocumentType>, UploadedFile), AppError> {
    let mut doc_type: Option<DocumentType> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart payload: {}", e)))?
    {
        match field.name() {
            Some("doc_type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid doc_type field: {}", e)))?;
                doc_type = Some(
                    serde_json::from_value(serde_json::Value::String(value.clone())).map_err(
                        |_| AppError::BadRequest(format!("unknown document type '{}'", value)),
                    )?,
                );
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(|f| f.to_string())
                    .ok_or_else(|| AppError::BadRequest("file name is required".to_string()))?;
                let content_type = field
                    .content_type()
                    .map(|c| c.to_string())
                    .ok_or_else(|| AppError::BadRequest("content type is required".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read file: {}", e)))?;

                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("a 'file' field is required".to_string()))?;

    Ok((doc_type, file))
}

async fn upload_mission_attachment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(mission_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let (doc_type, file) = read_multipart(multipart).await?;
    let doc_type = doc_type.unwrap_or(DocumentType::FicheMission);

    let controller = DocumentController::new(&state);
    let document = controller
        .upload_mission_attachment(&user.actor(), mission_id, doc_type, file)
        .await?;
    Ok(Json(ApiResponse::success(document)))
}

async fn upload_chauffeur_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(mission_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let (_, file) = read_multipart(multipart).await?;

    let controller = DocumentController::new(&state);
    let document = controller
        .upload_chauffeur_invoice(&user.actor(), mission_id, file)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        document,
        "Facture enregistrée".to_string(),
    )))
}

async fn upload_chauffeur_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(chauffeur_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let (_, file) = read_multipart(multipart).await?;

    let controller = DocumentController::new(&state);
    let document = controller
        .upload_chauffeur_document(&user.actor(), chauffeur_id, file)
        .await?;
    Ok(Json(ApiResponse::success(document)))
}

async fn list_mission_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(mission_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller = DocumentController::new(&state);
    let documents = controller.list_by_mission(&user.actor(), mission_id).await?;
    Ok(Json(documents))
}

async fn list_chauffeur_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(chauffeur_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller = DocumentController::new(&state);
    let documents = controller
        .list_by_chauffeur(&user.actor(), chauffeur_id)
        .await?;
    Ok(Json(documents))
}

async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DocumentController::new(&state);
    controller.delete(&user.actor(), id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Document supprimé"
    })))
}
