//! DTOs de tarificación

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::mission::VehicleCategory;

/// Request de cotización previa (paso de estimación del wizard)
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub vehicle_category: VehicleCategory,
    pub distance_km: Decimal,
}

/// Request admin de creación/actualización de un tramo de la grilla
#[derive(Debug, Deserialize)]
pub struct UpsertGridRequest {
    pub vehicle_category: VehicleCategory,
    pub min_km: Decimal,
    pub max_km: Option<Decimal>,
    pub price_ht: Decimal,
}
