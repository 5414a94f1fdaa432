//! Repositorio de tarificación
//!
//! Grilla de precios y configuración de TVA.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::mission::VehicleCategory;
use crate::models::pricing::{PricingGrid, VatSettings};
use crate::utils::errors::AppError;

pub struct PricingRepository {
    pool: PgPool,
}

impl PricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tramos de una categoría, ordenados por distancia mínima
    pub async fn grids_for_category(
        &self,
        category: VehicleCategory,
    ) -> Result<Vec<PricingGrid>, AppError> {
        let grids = sqlx::query_as::<_, PricingGrid>(
            "SELECT * FROM pricing_grids WHERE vehicle_category = $1 ORDER BY min_km ASC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(grids)
    }

    pub async fn list_grids(&self) -> Result<Vec<PricingGrid>, AppError> {
        let grids = sqlx::query_as::<_, PricingGrid>(
            "SELECT * FROM pricing_grids ORDER BY vehicle_category, min_km ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(grids)
    }

    pub async fn upsert_grid(
        &self,
        category: VehicleCategory,
        min_km: Decimal,
        max_km: Option<Decimal>,
        price_ht: Decimal,
    ) -> Result<PricingGrid, AppError> {
        let grid = sqlx::query_as::<_, PricingGrid>(
            r#"
            INSERT INTO pricing_grids (id, vehicle_category, min_km, max_km, price_ht, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (vehicle_category, min_km) DO UPDATE SET
                max_km = EXCLUDED.max_km,
                price_ht = EXCLUDED.price_ht
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category)
        .bind(min_km)
        .bind(max_km)
        .bind(price_ht)
        .fetch_one(&self.pool)
        .await?;

        Ok(grid)
    }

    /// Tasa de TVA activa
    pub async fn active_vat_rate(&self) -> Result<Decimal, AppError> {
        let settings = sqlx::query_as::<_, VatSettings>(
            "SELECT * FROM vat_settings WHERE active = TRUE ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        settings.map(|s| s.rate).ok_or_else(|| {
            AppError::Internal("no active VAT rate configured".to_string())
        })
    }
}
