//! Repositorio de perfiles
//!
//! Acceso a las tablas profiles y admin_invitation_tokens.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{AdminInvitationToken, Profile, Role};
use crate::utils::errors::AppError;

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
        phone: Option<&str>,
        role: Role,
    ) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, role, email, full_name, phone, profile_completed, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(role)
        .bind(email)
        .bind(full_name)
        .bind(phone)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn mark_profile_completed(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE profiles SET profile_completed = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Consumir un token de invitación admin: válido, no usado, no expirado.
    /// El update condicional marca used_at en la misma operación.
    pub async fn consume_invitation_token(&self, token: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE admin_invitation_tokens
            SET used_at = NOW()
            WHERE token = $1 AND used_at IS NULL AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Unauthorized(
                "invalid or expired invitation token".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn create_invitation_token(
        &self,
        created_by: Uuid,
        validity_hours: i64,
    ) -> Result<AdminInvitationToken, AppError> {
        use rand::distributions::Alphanumeric;
        use rand::Rng;

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        let invitation = sqlx::query_as::<_, AdminInvitationToken>(
            r#"
            INSERT INTO admin_invitation_tokens (token, created_by, expires_at, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(&token)
        .bind(created_by)
        .bind(Utc::now() + Duration::hours(validity_hours))
        .fetch_one(&self.pool)
        .await?;

        Ok(invitation)
    }
}
