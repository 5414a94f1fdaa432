//! Capacidades por actor
//!
//! En lugar de chequeos de rol dispersos, cada actor se resuelve una vez
//! a un valor `Capabilities` calculado a partir de rol + propiedad de la
//! misión, consumido uniformemente por la máquina de estados.

use uuid::Uuid;

use crate::models::mission::{Mission, MissionStatus};
use crate::models::profile::Role;

/// Actor autenticado que solicita una operación sobre una misión
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Capacidades del actor sobre una misión concreta
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub is_admin: bool,
    pub is_owner_client: bool,
    pub is_assigned_chauffeur: bool,
}

impl Capabilities {
    /// Resolver las capacidades de un actor sobre una misión
    pub fn resolve(actor: &Actor, mission: &Mission) -> Self {
        Self {
            is_admin: actor.role == Role::Admin,
            is_owner_client: actor.role == Role::Client && mission.client_id == actor.user_id,
            is_assigned_chauffeur: actor.role == Role::Chauffeur
                && mission.chauffeur_id == Some(actor.user_id),
        }
    }

    /// Cancelación: solo desde en_acceptation, por admin o cliente propietario
    pub fn can_cancel(&self, mission: &Mission) -> bool {
        (self.is_admin || self.is_owner_client)
            && mission.status == MissionStatus::EnAcceptation
    }

    /// Edición de precio y asignaciones: solo admin
    pub fn can_edit_pricing(&self) -> bool {
        self.is_admin
    }

    /// Edición de datos de la misión mientras no sea terminal
    pub fn can_edit_mission(&self, mission: &Mission) -> bool {
        self.is_admin && !mission.status.is_terminal()
    }

    /// Marcar/desmarcar el pago del chauffeur: solo admin
    pub fn can_toggle_paid(&self) -> bool {
        self.is_admin
    }
}
