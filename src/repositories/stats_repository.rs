//! Repositorio de estadísticas
//!
//! Consultas de agregación de solo lectura para los dashboards.
//! Las sumas monetarias se limitan a misiones completadas (livre/termine).

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::stats_dto::{ChauffeurSettlement, RevenueSummary, StatusCount};
use crate::utils::errors::AppError;

pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conteo de misiones por estado, opcionalmente filtrado por cliente o chauffeur
    pub async fn missions_by_status(
        &self,
        client_id: Option<Uuid>,
        chauffeur_id: Option<Uuid>,
    ) -> Result<Vec<StatusCount>, AppError> {
        let counts = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM missions
            WHERE ($1::uuid IS NULL OR client_id = $1)
              AND ($2::uuid IS NULL OR chauffeur_id = $2)
            GROUP BY status
            ORDER BY status
            "#,
        )
        .bind(client_id)
        .bind(chauffeur_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Sumas de facturación cliente sobre misiones completadas
    pub async fn revenue_summary(
        &self,
        client_id: Option<Uuid>,
    ) -> Result<RevenueSummary, AppError> {
        let summary = sqlx::query_as::<_, RevenueSummary>(
            r#"
            SELECT COUNT(*) AS mission_count,
                   COALESCE(SUM(price_ht), 0) AS total_ht,
                   COALESCE(SUM(price_ttc), 0) AS total_ttc
            FROM missions
            WHERE status = ANY(ARRAY['livre', 'termine']::mission_status[])
              AND ($1::uuid IS NULL OR client_id = $1)
            "#,
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Buckets de liquidación chauffeur: pagado / pendiente / sin factura
    pub async fn chauffeur_settlement(&self) -> Result<ChauffeurSettlement, AppError> {
        let settlement = sqlx::query_as::<_, ChauffeurSettlement>(
            r#"
            SELECT
                COALESCE(SUM(chauffeur_price_ht)
                    FILTER (WHERE chauffeur_invoice IS NOT NULL AND chauffeur_paid), 0) AS paid_total,
                COALESCE(SUM(chauffeur_price_ht)
                    FILTER (WHERE chauffeur_invoice IS NOT NULL AND NOT chauffeur_paid), 0) AS unpaid_total,
                COALESCE(SUM(chauffeur_price_ht)
                    FILTER (WHERE chauffeur_invoice IS NULL), 0) AS no_invoice_total
            FROM missions
            WHERE status = ANY(ARRAY['livre', 'termine']::mission_status[])
              AND chauffeur_price_ht IS NOT NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(settlement)
    }

    /// Totales adeudados/pagados a un chauffeur concreto
    pub async fn chauffeur_totals(
        &self,
        chauffeur_id: Uuid,
    ) -> Result<(Decimal, Decimal), AppError> {
        let totals: (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(chauffeur_price_ht) FILTER (WHERE NOT chauffeur_paid), 0),
                COALESCE(SUM(chauffeur_price_ht) FILTER (WHERE chauffeur_paid), 0)
            FROM missions
            WHERE status = ANY(ARRAY['livre', 'termine']::mission_status[])
              AND chauffeur_id = $1
              AND chauffeur_price_ht IS NOT NULL
            "#,
        )
        .bind(chauffeur_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }
}
