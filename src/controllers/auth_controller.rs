//! Controller de autenticación y perfiles
//!
//! Registro (con token de invitación para el rol admin), login,
//! y completado del perfil cliente/chauffeur.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::auth::generate_jwt_token;
use crate::models::chauffeur::{Chauffeur, CompleteChauffeurProfileRequest};
use crate::models::client::{Client, CompleteClientProfileRequest};
use crate::models::profile::{
    AdminInvitationToken, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, Role,
};
use crate::repositories::chauffeur_repository::ChauffeurRepository;
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::profile_repository::ProfileRepository;
use crate::utils::errors::AppError;

pub struct AuthController {
    profiles: ProfileRepository,
    clients: ClientRepository,
    chauffeurs: ChauffeurRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            profiles: ProfileRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            chauffeurs: ChauffeurRepository::new(pool),
            config,
        }
    }

    /// Registro de un nuevo perfil; el rol admin exige un token de invitación válido
    pub async fn register(&self, request: RegisterRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        if self.profiles.email_exists(&request.email).await? {
            return Err(AppError::Conflict(format!(
                "profile with email '{}' already exists",
                request.email
            )));
        }

        if request.role == Role::Admin {
            let token = request.invitation_token.as_deref().ok_or_else(|| {
                AppError::Unauthorized(
                    "an invitation token is required to register as admin".to_string(),
                )
            })?;
            self.profiles.consume_invitation_token(token).await?;
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("error hashing password: {}", e)))?;

        let profile = self
            .profiles
            .create(
                &request.email,
                &password_hash,
                &request.full_name,
                request.phone.as_deref(),
                request.role,
            )
            .await?;

        tracing::info!("👤 registered new {:?} profile {}", profile.role, profile.id);

        let access_token = generate_jwt_token(&profile, &self.config)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_expiration,
            profile: profile.into(),
        })
    }

    /// Login con email y password
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let profile = self
            .profiles
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

        let valid = bcrypt::verify(&request.password, &profile.password_hash)
            .map_err(|e| AppError::Hash(format!("error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }

        let access_token = generate_jwt_token(&profile, &self.config)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_expiration,
            profile: profile.into(),
        })
    }

    /// Perfil del usuario autenticado
    pub async fn me(&self, user_id: Uuid) -> Result<ProfileResponse, AppError> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("profile not found".to_string()))?;

        Ok(profile.into())
    }

    /// Completar la extensión cliente del perfil
    pub async fn complete_client_profile(
        &self,
        user_id: Uuid,
        role: Role,
        request: CompleteClientProfileRequest,
    ) -> Result<Client, AppError> {
        if role != Role::Client {
            return Err(AppError::Forbidden(
                "only client profiles can complete client details".to_string(),
            ));
        }

        request.validate()?;

        let client = self.clients.upsert(user_id, &request).await?;
        self.profiles.mark_profile_completed(user_id).await?;

        Ok(client)
    }

    /// Completar la extensión chauffeur del perfil
    pub async fn complete_chauffeur_profile(
        &self,
        user_id: Uuid,
        role: Role,
        request: CompleteChauffeurProfileRequest,
    ) -> Result<Chauffeur, AppError> {
        if role != Role::Chauffeur {
            return Err(AppError::Forbidden(
                "only chauffeur profiles can complete chauffeur details".to_string(),
            ));
        }

        request.validate()?;

        let chauffeur = self.chauffeurs.upsert(user_id, &request).await?;
        self.profiles.mark_profile_completed(user_id).await?;

        Ok(chauffeur)
    }

    /// Emitir un token de invitación admin (solo admin)
    pub async fn create_invitation(
        &self,
        created_by: Uuid,
    ) -> Result<AdminInvitationToken, AppError> {
        self.profiles
            .create_invitation_token(created_by, self.config.invitation_token_validity_hours)
            .await
    }
}
