//! Controller de documentos
//!
//! Uploads al blob store tras pasar el upload gate, registro de la
//! referencia en base, y el acoplamiento factura/pago del chauffeur.

use uuid::Uuid;

use crate::lifecycle::{Actor, Capabilities};
use crate::models::document::{Document, DocumentResponse, DocumentType};
use crate::models::mission::MissionStatus;
use crate::models::profile::Role;
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::mission_repository::MissionRepository;
use crate::services::storage_service::{StorageKey, StorageService};
use crate::services::upload_gate;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Archivo ya extraído del multipart por la capa de rutas
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct DocumentController {
    documents: DocumentRepository,
    missions: MissionRepository,
    storage: StorageService,
}

impl DocumentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            documents: DocumentRepository::new(state.pool.clone()),
            missions: MissionRepository::new(state.pool.clone()),
            storage: state.storage.clone(),
        }
    }

    /// Adjuntar un documento a una misión (admin, cliente propietario o
    /// chauffeur asignado)
    pub async fn upload_mission_attachment(
        &self,
        actor: &Actor,
        mission_id: Uuid,
        doc_type: DocumentType,
        file: UploadedFile,
    ) -> Result<DocumentResponse, AppError> {
        if doc_type == DocumentType::FactureChauffeur {
            return Err(AppError::BadRequest(
                "chauffeur invoices must go through the invoice endpoint".to_string(),
            ));
        }

        let mission = self
            .missions
            .find_by_id(mission_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", mission_id)))?;

        let caps = Capabilities::resolve(actor, &mission);
        if !caps.is_admin && !caps.is_owner_client && !caps.is_assigned_chauffeur {
            return Err(AppError::Forbidden(
                "you do not have access to this mission".to_string(),
            ));
        }

        upload_gate::validate_upload(&file.content_type, file.bytes.len())?;

        let key: String = StorageKey::mission_attachment(mission_id, &file.file_name).into();
        self.storage
            .upload(key.clone(), &file.content_type, file.bytes.clone())
            .await?;

        let document = self
            .documents
            .insert(
                Some(mission_id),
                None,
                doc_type,
                &key,
                &file.file_name,
                &file.content_type,
                file.bytes.len() as i64,
                actor.user_id,
            )
            .await?;

        Ok(self.to_response(document))
    }

    /// Subir un documento personal de chauffeur (permiso, kbis, seguro...)
    pub async fn upload_chauffeur_document(
        &self,
        actor: &Actor,
        chauffeur_id: Uuid,
        file: UploadedFile,
    ) -> Result<DocumentResponse, AppError> {
        let is_self = actor.role == Role::Chauffeur && actor.user_id == chauffeur_id;
        if !is_self && actor.role != Role::Admin {
            return Err(AppError::Forbidden(
                "you can only upload documents to your own profile".to_string(),
            ));
        }

        upload_gate::validate_upload(&file.content_type, file.bytes.len())?;

        let key: String = StorageKey::driver_document(chauffeur_id, &file.file_name).into();
        self.storage
            .upload(key.clone(), &file.content_type, file.bytes.clone())
            .await?;

        let document = self
            .documents
            .insert(
                None,
                Some(chauffeur_id),
                DocumentType::DocumentChauffeur,
                &key,
                &file.file_name,
                &file.content_type,
                file.bytes.len() as i64,
                actor.user_id,
            )
            .await?;

        Ok(self.to_response(document))
    }

    /// Adjuntar la factura del chauffeur a una misión completada
    ///
    /// La referencia en la misión se reserva primero con el update condicional
    /// (rechaza una segunda factura); si el upload al blob store falla después,
    /// la reserva se libera.
    pub async fn upload_chauffeur_invoice(
        &self,
        actor: &Actor,
        mission_id: Uuid,
        file: UploadedFile,
    ) -> Result<DocumentResponse, AppError> {
        let mission = self
            .missions
            .find_by_id(mission_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", mission_id)))?;

        let caps = Capabilities::resolve(actor, &mission);
        if !caps.is_admin && !caps.is_assigned_chauffeur {
            return Err(AppError::Forbidden(
                "only the assigned chauffeur can attach an invoice".to_string(),
            ));
        }

        if !matches!(mission.status, MissionStatus::Livre | MissionStatus::Termine) {
            return Err(AppError::Conflict(
                "invoices can only be attached to delivered missions".to_string(),
            ));
        }

        upload_gate::validate_invoice_upload(&file.content_type, file.bytes.len())?;

        let key: String = StorageKey::driver_invoice(mission_id, &file.file_name).into();

        self.missions.set_invoice(mission_id, &key).await?;

        if let Err(e) = self
            .storage
            .upload(key.clone(), &file.content_type, file.bytes.clone())
            .await
        {
            self.missions.clear_invoice(mission_id).await?;
            return Err(e);
        }

        let document = self
            .documents
            .insert(
                Some(mission_id),
                mission.chauffeur_id,
                DocumentType::FactureChauffeur,
                &key,
                &file.file_name,
                &file.content_type,
                file.bytes.len() as i64,
                actor.user_id,
            )
            .await?;

        tracing::info!("🧾 invoice attached to mission {}", mission_id);

        Ok(self.to_response(document))
    }

    /// Borrar un documento: primero el blob, después la referencia.
    /// Si era la factura de una misión, la referencia y el flag de pago
    /// se resetean juntos.
    pub async fn delete(&self, actor: &Actor, document_id: Uuid) -> Result<(), AppError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("document '{}' not found", document_id)))?;

        if actor.role != Role::Admin && document.uploaded_by != actor.user_id {
            return Err(AppError::Forbidden(
                "only admins or the uploader can delete a document".to_string(),
            ));
        }

        // el blob puede haber desaparecido; la referencia se borra igualmente
        if let Err(e) = self.storage.delete(&document.storage_path).await {
            tracing::warn!(
                "⚠️ blob delete failed for '{}', removing reference anyway: {}",
                document.storage_path,
                e
            );
        }

        if document.doc_type == DocumentType::FactureChauffeur {
            if let Some(mission_id) = document.mission_id {
                self.missions.clear_invoice(mission_id).await?;
            }
        }

        self.documents.delete(document_id).await
    }

    /// Documentos de una misión visible para el actor
    pub async fn list_by_mission(
        &self,
        actor: &Actor,
        mission_id: Uuid,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let mission = self
            .missions
            .find_by_id(mission_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", mission_id)))?;

        let caps = Capabilities::resolve(actor, &mission);
        if !caps.is_admin && !caps.is_owner_client && !caps.is_assigned_chauffeur {
            return Err(AppError::Forbidden(
                "you do not have access to this mission".to_string(),
            ));
        }

        let documents = self.documents.list_by_mission(mission_id).await?;
        Ok(documents.into_iter().map(|d| self.to_response(d)).collect())
    }

    /// Documentos personales de un chauffeur
    pub async fn list_by_chauffeur(
        &self,
        actor: &Actor,
        chauffeur_id: Uuid,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let is_self = actor.role == Role::Chauffeur && actor.user_id == chauffeur_id;
        if !is_self && actor.role != Role::Admin {
            return Err(AppError::Forbidden(
                "you can only list your own documents".to_string(),
            ));
        }

        let documents = self.documents.list_by_chauffeur(chauffeur_id).await?;
        Ok(documents.into_iter().map(|d| self.to_response(d)).collect())
    }

    fn to_response(&self, d: Document) -> DocumentResponse {
        let public_url = self.storage.public_url(&d.storage_path);
        DocumentResponse {
            id: d.id,
            mission_id: d.mission_id,
            chauffeur_id: d.chauffeur_id,
            doc_type: d.doc_type,
            file_name: d.file_name,
            content_type: d.content_type,
            size_bytes: d.size_bytes,
            public_url,
            created_at: d.created_at,
        }
    }
}
