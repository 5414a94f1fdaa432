//! Modelo de Mission
//!
//! Este módulo contiene el struct Mission (la entidad central del sistema),
//! los enums de estado y categoría de vehículo, y el historial de estados.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

/// Estado de la misión - mapea al ENUM mission_status
///
/// El camino nominal es estrictamente hacia adelante:
/// en_acceptation → accepte → prise_en_charge → livraison → livre → termine.
/// `annule` solo es alcanzable desde en_acceptation; `incident` desde
/// cualquier estado no terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "mission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    EnAcceptation,
    Accepte,
    PriseEnCharge,
    Livraison,
    Livre,
    Termine,
    Annule,
    Incident,
}

impl MissionStatus {
    /// Nombre tal como se almacena en la columna enum de PostgreSQL
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::EnAcceptation => "en_acceptation",
            MissionStatus::Accepte => "accepte",
            MissionStatus::PriseEnCharge => "prise_en_charge",
            MissionStatus::Livraison => "livraison",
            MissionStatus::Livre => "livre",
            MissionStatus::Termine => "termine",
            MissionStatus::Annule => "annule",
            MissionStatus::Incident => "incident",
        }
    }
}

/// Tipo de misión: livraison (entrega) o restitution (retorno)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "mission_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    Livraison,
    Restitution,
}

/// Categoría del vehículo transportado - mapea al ENUM vehicle_category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Citadine,
    Berline,
    Break,
    Monospace,
    Suv,
    Utilitaire,
    PoidsLourd,
    Autre,
}

/// Mission principal - mapea exactamente a la tabla missions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mission {
    pub id: Uuid,
    pub status: MissionStatus,
    pub mission_type: MissionType,
    pub client_id: Uuid,
    pub chauffeur_id: Option<Uuid>,

    // Dirección de prise en charge
    pub pickup_street: String,
    pub pickup_city: String,
    pub pickup_postal_code: String,
    pub pickup_country: String,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,

    // Dirección de livraison
    pub delivery_street: String,
    pub delivery_city: String,
    pub delivery_postal_code: String,
    pub delivery_country: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,

    // Tarificación calculada a la creación
    pub distance_km: Decimal,
    pub price_ht: Decimal,
    pub price_ttc: Decimal,
    pub vat_rate: Decimal,

    // Facturación del chauffeur (independiente del precio cliente)
    pub chauffeur_price_ht: Option<Decimal>,
    pub chauffeur_invoice: Option<String>,
    pub chauffeur_paid: bool,

    // Vehículo transportado
    pub vehicle_category: VehicleCategory,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<i32>,
    pub vehicle_registration: Option<String>,
    pub vehicle_vin: Option<String>,
    pub vehicle_fuel: Option<String>,

    // Contactos en cada extremo
    pub pickup_contact_name: Option<String>,
    pub pickup_contact_phone: Option<String>,
    pub pickup_contact_email: Option<String>,
    pub delivery_contact_name: Option<String>,
    pub delivery_contact_phone: Option<String>,
    pub delivery_contact_email: Option<String>,

    // Fechas y franjas horarias programadas
    pub d1_pec: Option<NaiveDate>,
    pub h1_pec: Option<NaiveTime>,
    pub h2_pec: Option<NaiveTime>,
    pub d2_liv: Option<NaiveDate>,
    pub h1_liv: Option<NaiveTime>,
    pub h2_liv: Option<NaiveTime>,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
}

/// Registro del historial de estados - mapea a mission_status_history
///
/// Append-only: una fila por transición exitosa, nunca se modifica ni borra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MissionStatusHistory {
    pub id: Uuid,
    pub mission_id: Uuid,
    pub old_status: MissionStatus,
    pub new_status: MissionStatus,
    pub changed_by: Uuid,
    pub changed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Dirección estructurada dentro del wizard de creación
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AddressPayload {
    #[validate(length(min = 2, max = 200))]
    pub street: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(custom = "crate::utils::validation::validate_postal_code")]
    pub postal_code: String,

    #[validate(length(min = 2, max = 60))]
    pub country: String,
}

/// Contacto de un extremo de la misión
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,
}

/// Request para crear una misión (payload acumulado del wizard)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMissionRequest {
    pub mission_type: MissionType,
    pub vehicle_category: VehicleCategory,

    #[validate]
    pub pickup_address: AddressPayload,

    #[validate]
    pub delivery_address: AddressPayload,

    #[validate(length(min = 2, max = 100))]
    pub vehicle_make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub vehicle_model: Option<String>,

    #[validate(range(min = 1950, max = 2030))]
    pub vehicle_year: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_registration")]
    pub vehicle_registration: Option<String>,
    pub vehicle_vin: Option<String>,
    pub vehicle_fuel: Option<String>,

    #[validate]
    pub pickup_contact: Option<ContactPayload>,

    #[validate]
    pub delivery_contact: Option<ContactPayload>,

    pub d1_pec: Option<NaiveDate>,
    pub h1_pec: Option<NaiveTime>,
    pub h2_pec: Option<NaiveTime>,
    pub d2_liv: Option<NaiveDate>,
    pub h1_liv: Option<NaiveTime>,
    pub h2_liv: Option<NaiveTime>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    // Paso 5 - solo admin: asignación de cliente, chauffeur y precios
    pub client_id: Option<Uuid>,
    pub chauffeur_id: Option<Uuid>,
    pub chauffeur_price_ht: Option<Decimal>,
    /// Override admin del precio calculado por la grilla
    pub price_ht: Option<Decimal>,
}

/// Request de edición admin (contactos, vehículo, precio, horarios)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMissionRequest {
    #[validate(length(min = 2, max = 100))]
    pub vehicle_make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub vehicle_model: Option<String>,

    #[validate(range(min = 1950, max = 2030))]
    pub vehicle_year: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_registration")]
    pub vehicle_registration: Option<String>,
    pub vehicle_vin: Option<String>,
    pub vehicle_fuel: Option<String>,

    #[validate]
    pub pickup_contact: Option<ContactPayload>,

    #[validate]
    pub delivery_contact: Option<ContactPayload>,

    pub d1_pec: Option<NaiveDate>,
    pub h1_pec: Option<NaiveTime>,
    pub h2_pec: Option<NaiveTime>,
    pub d2_liv: Option<NaiveDate>,
    pub h1_liv: Option<NaiveTime>,
    pub h2_liv: Option<NaiveTime>,

    pub price_ht: Option<Decimal>,
    pub chauffeur_id: Option<Uuid>,
    pub chauffeur_price_ht: Option<Decimal>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request de transición de estado
#[derive(Debug, Deserialize)]
pub struct TransitionMissionRequest {
    pub target_status: MissionStatus,
    /// Confirmación explícita, requerida para livraison → livre
    #[serde(default)]
    pub confirmed: bool,
    pub notes: Option<String>,
}

/// Filtros para búsqueda de misiones
#[derive(Debug, Deserialize)]
pub struct MissionFilters {
    pub status: Option<MissionStatus>,
    pub chauffeur_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de misión para la API
#[derive(Debug, Serialize)]
pub struct MissionResponse {
    #[serde(flatten)]
    pub mission: Mission,
}

impl From<Mission> for MissionResponse {
    fn from(mission: Mission) -> Self {
        Self { mission }
    }
}
