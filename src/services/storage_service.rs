//! Cliente del blob store (S3)
//!
//! Almacenamiento direccionado por path bajo prefijos lógicos:
//! `driver_invoices/<mission_id>/...`, `driver_documents/<user_id>/...`,
//! `mission_attachments/<mission_id>/...`.

use aws_sdk_s3 as s3;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Clave de objeto bajo un prefijo lógico
#[derive(Debug, Clone)]
pub struct StorageKey {
    pub prefix: String,
    pub filename: String,
}

impl StorageKey {
    pub fn driver_invoice(mission_id: Uuid, filename: &str) -> Self {
        Self {
            prefix: format!("driver_invoices/{}", mission_id),
            filename: filename.to_string(),
        }
    }

    pub fn driver_document(user_id: Uuid, filename: &str) -> Self {
        Self {
            prefix: format!("driver_documents/{}", user_id),
            filename: filename.to_string(),
        }
    }

    pub fn mission_attachment(mission_id: Uuid, filename: &str) -> Self {
        Self {
            prefix: format!("mission_attachments/{}", mission_id),
            filename: filename.to_string(),
        }
    }
}

impl From<StorageKey> for String {
    fn from(k: StorageKey) -> Self {
        format!("{}/{}", k.prefix, k.filename)
    }
}

#[derive(Clone)]
pub struct StorageService {
    client: s3::Client,
    bucket: String,
    public_base_url: String,
}

impl StorageService {
    pub async fn new(bucket: String, public_base_url: String) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: s3::Client::new(&config),
            bucket,
            public_base_url,
        }
    }

    /// Subir un objeto; la clave debe haber pasado por el upload gate antes
    pub async fn upload(
        &self,
        key: String,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(bytes.into())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("❌ failed to upload object '{}': {}", key, e);
                AppError::ExternalApi(format!("blob upload failed: {}", e))
            })?;

        tracing::info!("📦 uploaded object '{}'", key);
        Ok(())
    }

    /// Borrar un objeto del blob store
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("❌ failed to delete object '{}': {}", key, e);
                AppError::ExternalApi(format!("blob delete failed: {}", e))
            })?;

        Ok(())
    }

    /// URL pública de un objeto
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}
