//! Controller del directorio de clientes y chauffeurs
//!
//! Listados y fichas para el paso de asignación del admin; cada usuario
//! puede además consultar su propia ficha.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::chauffeur::Chauffeur;
use crate::models::client::Client;
use crate::models::profile::Role;
use crate::repositories::chauffeur_repository::ChauffeurRepository;
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::AppError;

pub struct DirectoryController {
    clients: ClientRepository,
    chauffeurs: ChauffeurRepository,
}

impl DirectoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            chauffeurs: ChauffeurRepository::new(pool),
        }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.clients.list().await
    }

    pub async fn get_client(
        &self,
        requester_id: Uuid,
        requester_role: Role,
        client_id: Uuid,
    ) -> Result<Client, AppError> {
        if requester_role != Role::Admin && requester_id != client_id {
            return Err(AppError::Forbidden(
                "you can only access your own client record".to_string(),
            ));
        }

        self.clients
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("client '{}' not found", client_id)))
    }

    pub async fn list_chauffeurs(&self) -> Result<Vec<Chauffeur>, AppError> {
        self.chauffeurs.list().await
    }

    pub async fn get_chauffeur(
        &self,
        requester_id: Uuid,
        requester_role: Role,
        chauffeur_id: Uuid,
    ) -> Result<Chauffeur, AppError> {
        if requester_role != Role::Admin && requester_id != chauffeur_id {
            return Err(AppError::Forbidden(
                "you can only access your own chauffeur record".to_string(),
            ));
        }

        self.chauffeurs
            .find_by_id(chauffeur_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("chauffeur '{}' not found", chauffeur_id)))
    }
}
