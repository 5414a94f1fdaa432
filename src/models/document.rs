//! Modelo de Document
//!
//! Referencia a un archivo almacenado en el blob store, adjunto a una
//! misión o a un chauffeur, categorizado por tipo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de documento - mapea al ENUM document_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Devis,
    Facture,
    FicheMission,
    FactureChauffeur,
    DocumentChauffeur,
}

/// Document - mapea exactamente a la tabla documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub mission_id: Option<Uuid>,
    pub chauffeur_id: Option<Uuid>,
    pub doc_type: DocumentType,
    pub storage_path: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Response de documento con URL pública del blob store
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub mission_id: Option<Uuid>,
    pub chauffeur_id: Option<Uuid>,
    pub doc_type: DocumentType,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub public_url: String,
    pub created_at: DateTime<Utc>,
}
