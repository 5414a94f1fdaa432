//! Repositorio de chauffeurs
//!
//! Extensión 1:1 del perfil para el rol chauffeur.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::chauffeur::{Chauffeur, CompleteChauffeurProfileRequest};
use crate::utils::errors::AppError;

pub struct ChauffeurRepository {
    pool: PgPool,
}

impl ChauffeurRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear o actualizar la extensión chauffeur del perfil
    pub async fn upsert(
        &self,
        profile_id: Uuid,
        data: &CompleteChauffeurProfileRequest,
    ) -> Result<Chauffeur, AppError> {
        let chauffeur = sqlx::query_as::<_, Chauffeur>(
            r#"
            INSERT INTO chauffeurs (id, company_name, siret, vat_number,
                license_number, license_expiry,
                billing_street, billing_city, billing_postal_code, billing_country,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                siret = EXCLUDED.siret,
                vat_number = EXCLUDED.vat_number,
                license_number = EXCLUDED.license_number,
                license_expiry = EXCLUDED.license_expiry,
                billing_street = EXCLUDED.billing_street,
                billing_city = EXCLUDED.billing_city,
                billing_postal_code = EXCLUDED.billing_postal_code,
                billing_country = EXCLUDED.billing_country,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(&data.company_name)
        .bind(&data.siret)
        .bind(&data.vat_number)
        .bind(&data.license_number)
        .bind(data.license_expiry)
        .bind(&data.billing_street)
        .bind(&data.billing_city)
        .bind(&data.billing_postal_code)
        .bind(&data.billing_country)
        .fetch_one(&self.pool)
        .await?;

        Ok(chauffeur)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Chauffeur>, AppError> {
        let chauffeur = sqlx::query_as::<_, Chauffeur>("SELECT * FROM chauffeurs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(chauffeur)
    }

    pub async fn list(&self) -> Result<Vec<Chauffeur>, AppError> {
        let chauffeurs =
            sqlx::query_as::<_, Chauffeur>("SELECT * FROM chauffeurs ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(chauffeurs)
    }
}
