//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de perfiles y misiones (formatos franceses: SIRET, teléfono, código postal).

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Teléfono francés: 0X XX XX XX XX o +33 X XX XX XX XX (espacios opcionales)
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^(?:\+33\s?|0)[1-9](?:[\s.-]?\d{2}){4}$").unwrap();

    /// Código postal francés: 5 dígitos
    static ref POSTAL_CODE_REGEX: Regex = Regex::new(r"^\d{5}$").unwrap();

    /// SIRET: 14 dígitos
    static ref SIRET_REGEX: Regex = Regex::new(r"^\d{14}$").unwrap();

    /// Número de TVA intracomunitario francés: FR + 2 caracteres + 9 dígitos
    static ref VAT_NUMBER_REGEX: Regex = Regex::new(r"^FR[0-9A-Z]{2}\d{9}$").unwrap();

    /// Matrícula francesa formato SIV: AA-123-AA
    static ref REGISTRATION_REGEX: Regex =
        Regex::new(r"^[A-Z]{2}-\d{3}-[A-Z]{2}$").unwrap();
}

/// Validar formato de teléfono francés
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_REGEX.is_match(value) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar código postal francés
pub fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    if !POSTAL_CODE_REGEX.is_match(value) {
        let mut error = ValidationError::new("postal_code");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar número SIRET (14 dígitos)
pub fn validate_siret(value: &str) -> Result<(), ValidationError> {
    if !SIRET_REGEX.is_match(value) {
        let mut error = ValidationError::new("siret");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar número de TVA intracomunitario
pub fn validate_vat_number(value: &str) -> Result<(), ValidationError> {
    if !VAT_NUMBER_REGEX.is_match(value) {
        let mut error = ValidationError::new("vat_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar matrícula de vehículo (formato SIV)
pub fn validate_registration(value: &str) -> Result<(), ValidationError> {
    if !REGISTRATION_REGEX.is_match(value) {
        let mut error = ValidationError::new("registration");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_formats() {
        assert!(validate_phone("0612345678").is_ok());
        assert!(validate_phone("06 12 34 56 78").is_ok());
        assert!(validate_phone("+33612345678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("0012345678").is_err());
    }

    #[test]
    fn test_validate_postal_code() {
        assert!(validate_postal_code("75001").is_ok());
        assert!(validate_postal_code("7500").is_err());
        assert!(validate_postal_code("ABCDE").is_err());
    }

    #[test]
    fn test_validate_siret() {
        assert!(validate_siret("12345678901234").is_ok());
        assert!(validate_siret("1234567890123").is_err());
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("AB-123-CD").is_ok());
        assert!(validate_registration("ab-123-cd").is_err());
        assert!(validate_registration("AB123CD").is_err());
    }
}
