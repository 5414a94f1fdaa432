//! Repositorio de clientes
//!
//! Extensión 1:1 del perfil para el rol cliente.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::{Client, CompleteClientProfileRequest};
use crate::utils::errors::AppError;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear o actualizar la extensión cliente del perfil
    pub async fn upsert(
        &self,
        profile_id: Uuid,
        data: &CompleteClientProfileRequest,
    ) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, company_name, siret, vat_number,
                billing_street, billing_city, billing_postal_code, billing_country,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                siret = EXCLUDED.siret,
                vat_number = EXCLUDED.vat_number,
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
        .bind(&data.billing_street)
        .bind(&data.billing_city)
        .bind(&data.billing_postal_code)
        .bind(&data.billing_country)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY company_name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }
}
