//! Validación previa de archivos subidos
//!
//! Barrera aplicada del lado servidor a todo upload (adjuntos de misión,
//! documentos y facturas de chauffeur) antes de cualquier llamada al blob
//! store: techo de tamaño fijo y allow-list de tipos MIME.

use crate::utils::errors::AppError;

/// Techo de tamaño: 10 MB
pub const MAX_UPLOAD_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Tipos MIME aceptados para adjuntos y documentos
pub const ALLOWED_CONTENT_TYPES: [&str; 6] = [
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Validar un upload genérico (adjunto de misión o documento de chauffeur)
pub fn validate_upload(content_type: &str, size_bytes: usize) -> Result<(), AppError> {
    if size_bytes > MAX_UPLOAD_SIZE_BYTES {
        return Err(AppError::BadRequest(format!(
            "file exceeds the {} MB size limit",
            MAX_UPLOAD_SIZE_BYTES / (1024 * 1024)
        )));
    }

    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(AppError::BadRequest(format!(
            "file type '{}' is not allowed",
            content_type
        )));
    }

    Ok(())
}

/// Validar la factura de un chauffeur: mismas reglas, pero solo PDF
pub fn validate_invoice_upload(content_type: &str, size_bytes: usize) -> Result<(), AppError> {
    validate_upload(content_type, size_bytes)?;

    if content_type != "application/pdf" {
        return Err(AppError::BadRequest(
            "chauffeur invoices must be PDF files".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: usize = 1024 * 1024;

    #[test]
    fn test_rejects_oversized_file() {
        assert!(validate_upload("application/pdf", 11 * MB).is_err());
    }

    #[test]
    fn test_rejects_disallowed_mime_type() {
        assert!(validate_upload("application/zip", 1 * MB).is_err());
        assert!(validate_upload("text/html", 1024).is_err());
    }

    #[test]
    fn test_accepts_pdf_under_limit() {
        assert!(validate_upload("application/pdf", 9 * MB).is_ok());
        assert!(validate_upload("image/png", 10 * MB).is_ok());
    }

    #[test]
    fn test_invoice_must_be_pdf() {
        assert!(validate_invoice_upload("application/pdf", 1 * MB).is_ok());
        assert!(validate_invoice_upload("image/jpeg", 1 * MB).is_err());
        assert!(validate_invoice_upload("application/pdf", 11 * MB).is_err());
    }
}
