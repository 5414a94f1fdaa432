//! Repositorio de misiones
//!
//! Acceso a las tablas missions y mission_status_history. La transición de
//! estado es un update condicional sobre el estado esperado (chequeo
//! optimista) más el insert del historial, en una sola transacción.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::mission::{Mission, MissionFilters, MissionStatus, MissionStatusHistory};
use crate::utils::errors::AppError;

pub struct MissionRepository {
    pool: PgPool,
}

impl MissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar una misión completa (construida por el controller)
    pub async fn insert(&self, m: &Mission) -> Result<Mission, AppError> {
        let mission = sqlx::query_as::<_, Mission>(
            r#"
            INSERT INTO missions (
                id, status, mission_type, client_id, chauffeur_id,
                pickup_street, pickup_city, pickup_postal_code, pickup_country, pickup_lat, pickup_lng,
                delivery_street, delivery_city, delivery_postal_code, delivery_country, delivery_lat, delivery_lng,
                distance_km, price_ht, price_ttc, vat_rate,
                chauffeur_price_ht, chauffeur_invoice, chauffeur_paid,
                vehicle_category, vehicle_make, vehicle_model, vehicle_year,
                vehicle_registration, vehicle_vin, vehicle_fuel,
                pickup_contact_name, pickup_contact_phone, pickup_contact_email,
                delivery_contact_name, delivery_contact_phone, delivery_contact_email,
                d1_pec, h1_pec, h2_pec, d2_liv, h1_liv, h2_liv,
                notes, created_at, updated_at, completion_date
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21,
                $22, $23, $24,
                $25, $26, $27, $28,
                $29, $30, $31,
                $32, $33, $34,
                $35, $36, $37,
                $38, $39, $40, $41, $42, $43,
                $44, $45, $46, $47
            )
            RETURNING *
            "#,
        )
        .bind(m.id)
        .bind(m.status)
        .bind(m.mission_type)
        .bind(m.client_id)
        .bind(m.chauffeur_id)
        .bind(&m.pickup_street)
        .bind(&m.pickup_city)
        .bind(&m.pickup_postal_code)
        .bind(&m.pickup_country)
        .bind(m.pickup_lat)
        .bind(m.pickup_lng)
        .bind(&m.delivery_street)
        .bind(&m.delivery_city)
        .bind(&m.delivery_postal_code)
        .bind(&m.delivery_country)
        .bind(m.delivery_lat)
        .bind(m.delivery_lng)
        .bind(m.distance_km)
        .bind(m.price_ht)
        .bind(m.price_ttc)
        .bind(m.vat_rate)
        .bind(m.chauffeur_price_ht)
        .bind(&m.chauffeur_invoice)
        .bind(m.chauffeur_paid)
        .bind(m.vehicle_category)
        .bind(&m.vehicle_make)
        .bind(&m.vehicle_model)
        .bind(m.vehicle_year)
        .bind(&m.vehicle_registration)
        .bind(&m.vehicle_vin)
        .bind(&m.vehicle_fuel)
        .bind(&m.pickup_contact_name)
        .bind(&m.pickup_contact_phone)
        .bind(&m.pickup_contact_email)
        .bind(&m.delivery_contact_name)
        .bind(&m.delivery_contact_phone)
        .bind(&m.delivery_contact_email)
        .bind(m.d1_pec)
        .bind(m.h1_pec)
        .bind(m.h2_pec)
        .bind(m.d2_liv)
        .bind(m.h1_liv)
        .bind(m.h2_liv)
        .bind(&m.notes)
        .bind(m.created_at)
        .bind(m.updated_at)
        .bind(m.completion_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(mission)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, AppError> {
        let mission = sqlx::query_as::<_, Mission>("SELECT * FROM missions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(mission)
    }

    pub async fn list(&self, filters: &MissionFilters) -> Result<Vec<Mission>, AppError> {
        let limit = filters.limit.unwrap_or(50).min(100);
        let offset = filters.offset.unwrap_or(0);

        let missions = sqlx::query_as::<_, Mission>(
            r#"
            SELECT * FROM missions
            WHERE ($1::mission_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR chauffeur_id = $2)
              AND ($3::uuid IS NULL OR client_id = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.status)
        .bind(filters.chauffeur_id)
        .bind(filters.client_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(missions)
    }

    /// Actualizar los campos editables (el controller ya hizo el merge)
    pub async fn update_details(&self, m: &Mission) -> Result<Mission, AppError> {
        let mission = sqlx::query_as::<_, Mission>(
            r#"
            UPDATE missions SET
                chauffeur_id = $2,
                price_ht = $3, price_ttc = $4,
                chauffeur_price_ht = $5,
                vehicle_make = $6, vehicle_model = $7, vehicle_year = $8,
                vehicle_registration = $9, vehicle_vin = $10, vehicle_fuel = $11,
                pickup_contact_name = $12, pickup_contact_phone = $13, pickup_contact_email = $14,
                delivery_contact_name = $15, delivery_contact_phone = $16, delivery_contact_email = $17,
                d1_pec = $18, h1_pec = $19, h2_pec = $20,
                d2_liv = $21, h1_liv = $22, h2_liv = $23,
                notes = $24,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(m.id)
        .bind(m.chauffeur_id)
        .bind(m.price_ht)
        .bind(m.price_ttc)
        .bind(m.chauffeur_price_ht)
        .bind(&m.vehicle_make)
        .bind(&m.vehicle_model)
        .bind(m.vehicle_year)
        .bind(&m.vehicle_registration)
        .bind(&m.vehicle_vin)
        .bind(&m.vehicle_fuel)
        .bind(&m.pickup_contact_name)
        .bind(&m.pickup_contact_phone)
        .bind(&m.pickup_contact_email)
        .bind(&m.delivery_contact_name)
        .bind(&m.delivery_contact_phone)
        .bind(&m.delivery_contact_email)
        .bind(m.d1_pec)
        .bind(m.h1_pec)
        .bind(m.h2_pec)
        .bind(m.d2_liv)
        .bind(m.h1_liv)
        .bind(m.h2_liv)
        .bind(&m.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(mission)
    }

    /// Aplicar una transición ya validada por el gestor de ciclo de vida
    ///
    /// El update solo se aplica si el estado actual sigue siendo el esperado;
    /// cero filas afectadas significa que otro actor ganó la carrera y se
    /// devuelve un conflicto reintentable. El historial se inserta en la
    /// misma transacción.
    pub async fn transition(
        &self,
        mission_id: Uuid,
        expected: MissionStatus,
        entry: &MissionStatusHistory,
        completion_date: Option<DateTime<Utc>>,
    ) -> Result<Mission, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Mission>(
            r#"
            UPDATE missions
            SET status = $3,
                completion_date = COALESCE(completion_date, $4),
                updated_at = $5
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(mission_id)
        .bind(expected)
        .bind(entry.new_status)
        .bind(completion_date)
        .bind(entry.changed_at)
        .fetch_optional(&mut *tx)
        .await?;

        let mission = match updated {
            Some(m) => m,
            None => {
                tx.rollback().await?;
                return Err(AppError::Conflict(
                    "mission status changed concurrently, please retry".to_string(),
                ));
            }
        };

        sqlx::query(
            r#"
            INSERT INTO mission_status_history
                (id, mission_id, old_status, new_status, changed_by, changed_at, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.mission_id)
        .bind(entry.old_status)
        .bind(entry.new_status)
        .bind(entry.changed_by)
        .bind(entry.changed_at)
        .bind(&entry.notes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(mission)
    }

    /// Historial completo de una misión, en orden cronológico
    pub async fn history(&self, mission_id: Uuid) -> Result<Vec<MissionStatusHistory>, AppError> {
        let entries = sqlx::query_as::<_, MissionStatusHistory>(
            "SELECT * FROM mission_status_history WHERE mission_id = $1 ORDER BY changed_at ASC",
        )
        .bind(mission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Registrar la factura del chauffeur (una sola por misión)
    pub async fn set_invoice(&self, mission_id: Uuid, path: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE missions
            SET chauffeur_invoice = $2, updated_at = NOW()
            WHERE id = $1 AND chauffeur_invoice IS NULL
            "#,
        )
        .bind(mission_id)
        .bind(path)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "mission already has an invoice attached".to_string(),
            ));
        }

        Ok(())
    }

    /// Borrar la factura: limpia la referencia Y resetea chauffeur_paid
    /// en la misma sentencia (el pago no puede quedar sin factura)
    pub async fn clear_invoice(&self, mission_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE missions
            SET chauffeur_invoice = NULL, chauffeur_paid = FALSE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(mission_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Marcar o desmarcar el pago; marcar requiere factura adjunta
    pub async fn set_paid(&self, mission_id: Uuid, paid: bool) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE missions
            SET chauffeur_paid = $2, updated_at = NOW()
            WHERE id = $1 AND ($2 = FALSE OR chauffeur_invoice IS NOT NULL)
            "#,
        )
        .bind(mission_id)
        .bind(paid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "cannot mark as paid without an attached invoice".to_string(),
            ));
        }

        Ok(())
    }
}
