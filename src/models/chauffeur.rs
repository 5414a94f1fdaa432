//! Modelo de Chauffeur
//!
//! Extensión 1:1 del Profile para el rol chauffeur: datos legales,
//! permiso de conducir y referencias a documentos subidos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Chauffeur - mapea exactamente a la tabla chauffeurs (clave = profile id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chauffeur {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub siret: String,
    pub vat_number: Option<String>,
    pub license_number: String,
    pub license_expiry: Option<NaiveDate>,
    pub billing_street: String,
    pub billing_city: String,
    pub billing_postal_code: String,
    pub billing_country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para completar el perfil chauffeur
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteChauffeurProfileRequest {
    #[validate(length(min = 2, max = 200))]
    pub company_name: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_siret")]
    pub siret: String,

    #[validate(custom = "crate::utils::validation::validate_vat_number")]
    pub vat_number: Option<String>,

    #[validate(length(min = 5, max = 50))]
    pub license_number: String,

    pub license_expiry: Option<NaiveDate>,

    #[validate(length(min = 2, max = 200))]
    pub billing_street: String,

    #[validate(length(min = 1, max = 100))]
    pub billing_city: String,

    #[validate(custom = "crate::utils::validation::validate_postal_code")]
    pub billing_postal_code: String,

    #[validate(length(min = 2, max = 60))]
    pub billing_country: String,
}
