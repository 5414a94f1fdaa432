//! Controller de tarificación
//!
//! Cotización previa para el wizard y administración de la grilla de precios.

use sqlx::PgPool;

use crate::dto::pricing_dto::{QuoteRequest, UpsertGridRequest};
use crate::models::pricing::{PriceQuote, PricingGrid};
use crate::repositories::pricing_repository::PricingRepository;
use crate::services::pricing_service;
use crate::utils::errors::AppError;

pub struct PricingController {
    pricing: PricingRepository,
}

impl PricingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pricing: PricingRepository::new(pool),
        }
    }

    /// Cotizar una distancia para una categoría con la grilla vigente
    pub async fn quote(&self, request: QuoteRequest) -> Result<PriceQuote, AppError> {
        let grids = self
            .pricing
            .grids_for_category(request.vehicle_category)
            .await?;
        let vat_rate = self.pricing.active_vat_rate().await?;

        pricing_service::quote(
            &grids,
            request.vehicle_category,
            request.distance_km,
            vat_rate,
        )
    }

    /// Grilla completa (solo admin)
    pub async fn list_grids(&self) -> Result<Vec<PricingGrid>, AppError> {
        self.pricing.list_grids().await
    }

    /// Crear o actualizar un tramo de la grilla (solo admin)
    ///
    /// Además de validar el tramo en sí, se verifica que la grilla resultante
    /// de la categoría quede contigua: un hueco entre tramos dejaría
    /// distancias sin precio y bloquearía la creación de misiones.
    pub async fn upsert_grid(&self, request: UpsertGridRequest) -> Result<PricingGrid, AppError> {
        if request.price_ht <= rust_decimal::Decimal::ZERO {
            return Err(AppError::BadRequest(
                "price_ht must be positive".to_string(),
            ));
        }
        if let Some(max) = request.max_km {
            if max < request.min_km {
                return Err(AppError::BadRequest(
                    "max_km cannot be lower than min_km".to_string(),
                ));
            }
        }

        let mut grids = self
            .pricing
            .grids_for_category(request.vehicle_category)
            .await?;
        grids.retain(|g| g.min_km != request.min_km);
        grids.push(PricingGrid {
            id: uuid::Uuid::new_v4(),
            vehicle_category: request.vehicle_category,
            min_km: request.min_km,
            max_km: request.max_km,
            price_ht: request.price_ht,
            created_at: chrono::Utc::now(),
        });
        pricing_service::validate_contiguity(&grids)?;

        self.pricing
            .upsert_grid(
                request.vehicle_category,
                request.min_km,
                request.max_km,
                request.price_ht,
            )
            .await
    }
}
