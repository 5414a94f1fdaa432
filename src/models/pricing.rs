//! Modelos de tarificación
//!
//! Grilla de precios por categoría de vehículo y tramo de distancia,
//! y configuración de TVA.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::mission::VehicleCategory;

/// Tramo de la grilla de precios - mapea a pricing_grids
///
/// `max_km = NULL` representa un tramo abierto (sin límite superior).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricingGrid {
    pub id: Uuid,
    pub vehicle_category: VehicleCategory,
    pub min_km: Decimal,
    pub max_km: Option<Decimal>,
    pub price_ht: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Configuración de TVA - mapea a vat_settings (una fila activa)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VatSettings {
    pub id: Uuid,
    pub rate: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Cotización calculada por el motor de precios
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceQuote {
    pub distance_km: Decimal,
    pub price_ht: Decimal,
    pub price_ttc: Decimal,
    pub vat_rate: Decimal,
}
