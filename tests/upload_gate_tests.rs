//! Tests de integración del upload gate

use dk_automotive::services::upload_gate::{
    validate_invoice_upload, validate_upload, ALLOWED_CONTENT_TYPES, MAX_UPLOAD_SIZE_BYTES,
};

#[test]
fn test_every_allowed_type_passes_under_limit() {
    for content_type in ALLOWED_CONTENT_TYPES {
        assert!(
            validate_upload(content_type, 1024).is_ok(),
            "{} should be accepted",
            content_type
        );
    }
}

#[test]
fn test_size_limit_is_a_hard_ceiling() {
    assert!(validate_upload("application/pdf", MAX_UPLOAD_SIZE_BYTES).is_ok());
    assert!(validate_upload("application/pdf", MAX_UPLOAD_SIZE_BYTES + 1).is_err());
}

#[test]
fn test_executable_and_archive_types_rejected() {
    for content_type in [
        "application/zip",
        "application/x-msdownload",
        "application/octet-stream",
        "text/javascript",
    ] {
        assert!(validate_upload(content_type, 1024).is_err());
    }
}

#[test]
fn test_invoice_gate_is_stricter_than_generic_gate() {
    // una imagen pasa el gate genérico pero no el de facturas
    assert!(validate_upload("image/png", 1024).is_ok());
    assert!(validate_invoice_upload("image/png", 1024).is_err());
    assert!(validate_invoice_upload("application/pdf", 1024).is_ok());
}
