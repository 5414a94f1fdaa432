//! Repositorio de documentos
//!
//! Referencias a archivos del blob store adjuntos a misiones o chauffeurs.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::{Document, DocumentType};
use crate::utils::errors::AppError;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        mission_id: Option<Uuid>,
        chauffeur_id: Option<Uuid>,
        doc_type: DocumentType,
        storage_path: &str,
        file_name: &str,
        content_type: &str,
        size_bytes: i64,
        uploaded_by: Uuid,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (id, mission_id, chauffeur_id, doc_type, storage_path,
                file_name, content_type, size_bytes, uploaded_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(mission_id)
        .bind(chauffeur_id)
        .bind(doc_type)
        .bind(storage_path)
        .bind(file_name)
        .bind(content_type)
        .bind(size_bytes)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
    }

    pub async fn list_by_mission(&self, mission_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE mission_id = $1 ORDER BY created_at DESC",
        )
        .bind(mission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn list_by_chauffeur(&self, chauffeur_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE chauffeur_id = $1 ORDER BY created_at DESC",
        )
        .bind(chauffeur_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
