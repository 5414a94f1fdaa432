//! Tabla de transiciones de estado
//!
//! El camino nominal es estrictamente hacia adelante; `annule` e `incident`
//! son escapes. Cada transición exitosa produce exactamente una entrada de
//! historial. `validate_transition` es el único punto de decisión; `apply`
//! es la contraparte pura de la escritura persistida y la usan los tests.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::mission::{Mission, MissionStatus, MissionStatusHistory};
use crate::utils::errors::AppError;

use super::capabilities::{Actor, Capabilities};

impl MissionStatus {
    /// Estados alcanzables directamente desde `self`, según la tabla de autoridad
    pub fn allowed_next(&self) -> &'static [MissionStatus] {
        use MissionStatus::*;
        match self {
            EnAcceptation => &[Accepte, Annule, Incident],
            Accepte => &[PriseEnCharge, Incident],
            PriseEnCharge => &[Livraison, Incident],
            Livraison => &[Livre, Incident],
            Livre => &[Termine, Incident],
            Termine | Annule | Incident => &[],
        }
    }

    /// Estados terminales: no admiten ninguna transición posterior
    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }
}

/// Rechazo de una transición solicitada
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransitionError {
    #[error("transition from '{from}' to '{to}' is not allowed")]
    NotAllowed { from: &'static str, to: &'static str },

    #[error("actor is not allowed to perform this transition")]
    ActorNotAllowed,

    #[error("mission has no assigned chauffeur")]
    ChauffeurRequired,

    #[error("pickup can only start on the scheduled pickup date")]
    PickupDateNotReached,

    #[error("explicit delivery confirmation is required")]
    ConfirmationRequired,

    #[error("mission is missing required fields for acceptance")]
    MissingRequiredFields,
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::NotAllowed { .. } => AppError::Conflict(e.to_string()),
            TransitionError::ActorNotAllowed | TransitionError::PickupDateNotReached => {
                AppError::Forbidden(e.to_string())
            }
            TransitionError::ChauffeurRequired
            | TransitionError::ConfirmationRequired
            | TransitionError::MissingRequiredFields => AppError::BadRequest(e.to_string()),
        }
    }
}

/// Validar una transición solicitada sin aplicarla
///
/// Orden de chequeo: arista en la tabla, autoridad del actor, precondiciones.
/// Un rechazo no produce ningún cambio de estado ni entrada de historial.
pub fn validate_transition(
    mission: &Mission,
    caps: &Capabilities,
    target: MissionStatus,
    confirmed: bool,
    today: NaiveDate,
) -> Result<(), TransitionError> {
    use MissionStatus::*;

    if !mission.status.allowed_next().contains(&target) {
        return Err(TransitionError::NotAllowed {
            from: mission.status.as_str(),
            to: target.as_str(),
        });
    }

    // chauffeur_id debe estar asignado antes de cualquier estado de ejecución
    if matches!(target, PriseEnCharge | Livraison | Livre) && mission.chauffeur_id.is_none() {
        return Err(TransitionError::ChauffeurRequired);
    }

    match target {
        Accepte => {
            if !caps.is_admin {
                return Err(TransitionError::ActorNotAllowed);
            }
            if mission.pickup_street.trim().is_empty()
                || mission.delivery_street.trim().is_empty()
                || mission.price_ht <= rust_decimal::Decimal::ZERO
            {
                return Err(TransitionError::MissingRequiredFields);
            }
        }

        Annule => {
            if !caps.can_cancel(mission) {
                return Err(TransitionError::ActorNotAllowed);
            }
        }

        PriseEnCharge => {
            if caps.is_admin {
                // el admin no está limitado por la fecha programada
            } else if caps.is_assigned_chauffeur {
                if mission.d1_pec != Some(today) {
                    return Err(TransitionError::PickupDateNotReached);
                }
            } else {
                return Err(TransitionError::ActorNotAllowed);
            }
        }

        Livraison => {
            if !caps.is_admin && !caps.is_assigned_chauffeur {
                return Err(TransitionError::ActorNotAllowed);
            }
        }

        Livre => {
            if !caps.is_admin && !caps.is_assigned_chauffeur {
                return Err(TransitionError::ActorNotAllowed);
            }
            if !confirmed {
                return Err(TransitionError::ConfirmationRequired);
            }
        }

        Termine | Incident => {
            if !caps.is_admin {
                return Err(TransitionError::ActorNotAllowed);
            }
        }

        EnAcceptation => {
            // estado inicial, nunca es destino de una transición
            return Err(TransitionError::NotAllowed {
                from: mission.status.as_str(),
                to: target.as_str(),
            });
        }
    }

    Ok(())
}

/// Aplicar una transición validada sobre la misión en memoria
///
/// Muta `status`, fija `completion_date` en la primera entrada a `livre`
/// (exactamente una vez) y devuelve la entrada de historial correspondiente.
pub fn apply(
    mission: &mut Mission,
    actor: &Actor,
    target: MissionStatus,
    confirmed: bool,
    notes: Option<String>,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<MissionStatusHistory, TransitionError> {
    let caps = Capabilities::resolve(actor, mission);
    validate_transition(mission, &caps, target, confirmed, today)?;

    let old_status = mission.status;
    mission.status = target;
    mission.updated_at = now;

    if target == MissionStatus::Livre && mission.completion_date.is_none() {
        mission.completion_date = Some(now);
    }

    Ok(MissionStatusHistory {
        id: Uuid::new_v4(),
        mission_id: mission.id,
        old_status,
        new_status: target,
        changed_by: actor.user_id,
        changed_at: now,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mission::{MissionType, VehicleCategory};
    use crate::models::profile::Role;
    use rust_decimal::Decimal;

    fn mission(client_id: Uuid, chauffeur_id: Option<Uuid>) -> Mission {
        let now = Utc::now();
        Mission {
            id: Uuid::new_v4(),
            status: MissionStatus::EnAcceptation,
            mission_type: MissionType::Livraison,
            client_id,
            chauffeur_id,
            pickup_street: "12 rue de la République".to_string(),
            pickup_city: "Lyon".to_string(),
            pickup_postal_code: "69001".to_string(),
            pickup_country: "France".to_string(),
            pickup_lat: None,
            pickup_lng: None,
            delivery_street: "4 avenue Foch".to_string(),
            delivery_city: "Paris".to_string(),
            delivery_postal_code: "75116".to_string(),
            delivery_country: "France".to_string(),
            delivery_lat: None,
            delivery_lng: None,
            distance_km: Decimal::new(100, 0),
            price_ht: Decimal::new(5000, 2),
            price_ttc: Decimal::new(6000, 2),
            vat_rate: Decimal::new(20, 0),
            chauffeur_price_ht: None,
            chauffeur_invoice: None,
            chauffeur_paid: false,
            vehicle_category: VehicleCategory::Citadine,
            vehicle_make: Some("Renault".to_string()),
            vehicle_model: Some("Clio".to_string()),
            vehicle_year: Some(2021),
            vehicle_registration: Some("AB-123-CD".to_string()),
            vehicle_vin: None,
            vehicle_fuel: Some("essence".to_string()),
            pickup_contact_name: None,
            pickup_contact_phone: None,
            pickup_contact_email: None,
            delivery_contact_name: None,
            delivery_contact_phone: None,
            delivery_contact_email: None,
            d1_pec: None,
            h1_pec: None,
            h2_pec: None,
            d2_liv: None,
            h1_liv: None,
            h2_liv: None,
            notes: None,
            created_at: now,
            updated_at: now,
            completion_date: None,
        }
    }

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Admin)
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[test]
    fn test_forward_only_table() {
        use MissionStatus::*;
        // cada arista del historial debe existir en la tabla; aquí se valida
        // que la tabla no contenga saltos ni retrocesos
        assert_eq!(EnAcceptation.allowed_next(), &[Accepte, Annule, Incident]);
        assert_eq!(Accepte.allowed_next(), &[PriseEnCharge, Incident]);
        assert_eq!(PriseEnCharge.allowed_next(), &[Livraison, Incident]);
        assert_eq!(Livraison.allowed_next(), &[Livre, Incident]);
        assert_eq!(Livre.allowed_next(), &[Termine, Incident]);
        assert!(Termine.allowed_next().is_empty());
        assert!(Annule.allowed_next().is_empty());
        assert!(Incident.allowed_next().is_empty());
    }

    #[test]
    fn test_skip_intermediate_state_rejected() {
        let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
        let err = apply(
            &mut m,
            &admin(),
            MissionStatus::Livre,
            true,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, TransitionError::NotAllowed { .. }));
        assert_eq!(m.status, MissionStatus::EnAcceptation);
    }

    #[test]
    fn test_accept_requires_admin() {
        let client_id = Uuid::new_v4();
        let mut m = mission(client_id, None);
        let client_actor = Actor::new(client_id, Role::Client);
        let err = apply(
            &mut m,
            &client_actor,
            MissionStatus::Accepte,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ActorNotAllowed);
    }

    #[test]
    fn test_prise_en_charge_requires_chauffeur_assigned() {
        let mut m = mission(Uuid::new_v4(), None);
        m.status = MissionStatus::Accepte;
        let err = apply(
            &mut m,
            &admin(),
            MissionStatus::PriseEnCharge,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ChauffeurRequired);
    }

    #[test]
    fn test_chauffeur_gated_by_pickup_date() {
        let chauffeur_id = Uuid::new_v4();
        let mut m = mission(Uuid::new_v4(), Some(chauffeur_id));
        m.status = MissionStatus::Accepte;
        m.d1_pec = Some(today().succ_opt().unwrap());
        let chauffeur_actor = Actor::new(chauffeur_id, Role::Chauffeur);

        let err = apply(
            &mut m,
            &chauffeur_actor,
            MissionStatus::PriseEnCharge,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::PickupDateNotReached);

        // el mismo día programado, la transición pasa
        m.d1_pec = Some(today());
        apply(
            &mut m,
            &chauffeur_actor,
            MissionStatus::PriseEnCharge,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(m.status, MissionStatus::PriseEnCharge);
    }

    #[test]
    fn test_admin_not_gated_by_pickup_date() {
        let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
        m.status = MissionStatus::Accepte;
        m.d1_pec = Some(today().succ_opt().unwrap());
        apply(
            &mut m,
            &admin(),
            MissionStatus::PriseEnCharge,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(m.status, MissionStatus::PriseEnCharge);
    }

    #[test]
    fn test_unassigned_chauffeur_cannot_transition() {
        let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
        m.status = MissionStatus::PriseEnCharge;
        // otro chauffeur distinto al asignado
        let stranger = Actor::new(Uuid::new_v4(), Role::Chauffeur);
        let err = apply(
            &mut m,
            &stranger,
            MissionStatus::Livraison,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ActorNotAllowed);
        assert_eq!(m.status, MissionStatus::PriseEnCharge);
    }

    #[test]
    fn test_livre_requires_confirmation() {
        let chauffeur_id = Uuid::new_v4();
        let mut m = mission(Uuid::new_v4(), Some(chauffeur_id));
        m.status = MissionStatus::Livraison;
        let chauffeur_actor = Actor::new(chauffeur_id, Role::Chauffeur);

        let err = apply(
            &mut m,
            &chauffeur_actor,
            MissionStatus::Livre,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ConfirmationRequired);

        apply(
            &mut m,
            &chauffeur_actor,
            MissionStatus::Livre,
            true,
            None,
            today(),
            Utc::now(),
        )
        .unwrap();
        assert!(m.completion_date.is_some());
    }

    #[test]
    fn test_completion_date_set_once() {
        let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
        m.status = MissionStatus::Livraison;
        let first = Utc::now();
        apply(&mut m, &admin(), MissionStatus::Livre, true, None, today(), first).unwrap();
        assert_eq!(m.completion_date, Some(first));

        // re-entrar a livre es imposible: livre solo avanza a termine/incident
        let err = apply(
            &mut m,
            &admin(),
            MissionStatus::Livre,
            true,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, TransitionError::NotAllowed { .. }));
        assert_eq!(m.completion_date, Some(first));
    }

    #[test]
    fn test_cancellation_gate() {
        let client_id = Uuid::new_v4();
        let client_actor = Actor::new(client_id, Role::Client);

        // desde en_acceptation: el cliente propietario puede anular
        let mut m = mission(client_id, None);
        apply(
            &mut m,
            &client_actor,
            MissionStatus::Annule,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(m.status, MissionStatus::Annule);

        // desde accepte: rechazado para cualquier actor, incluso admin
        let mut m2 = mission(client_id, None);
        m2.status = MissionStatus::Accepte;
        let err = apply(
            &mut m2,
            &admin(),
            MissionStatus::Annule,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, TransitionError::NotAllowed { .. }));
        assert_eq!(m2.status, MissionStatus::Accepte);
    }

    #[test]
    fn test_non_owner_client_cannot_cancel() {
        let mut m = mission(Uuid::new_v4(), None);
        let other_client = Actor::new(Uuid::new_v4(), Role::Client);
        let err = apply(
            &mut m,
            &other_client,
            MissionStatus::Annule,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ActorNotAllowed);
    }

    #[test]
    fn test_incident_from_non_terminal_only() {
        for status in [
            MissionStatus::EnAcceptation,
            MissionStatus::Accepte,
            MissionStatus::PriseEnCharge,
            MissionStatus::Livraison,
            MissionStatus::Livre,
        ] {
            let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
            m.status = status;
            apply(
                &mut m,
                &admin(),
                MissionStatus::Incident,
                false,
                None,
                today(),
                Utc::now(),
            )
            .unwrap();
            assert_eq!(m.status, MissionStatus::Incident);
        }

        for status in [
            MissionStatus::Termine,
            MissionStatus::Annule,
            MissionStatus::Incident,
        ] {
            let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
            m.status = status;
            assert!(apply(
                &mut m,
                &admin(),
                MissionStatus::Incident,
                false,
                None,
                today(),
                Utc::now(),
            )
            .is_err());
        }
    }

    #[test]
    fn test_incident_requires_admin() {
        let chauffeur_id = Uuid::new_v4();
        let mut m = mission(Uuid::new_v4(), Some(chauffeur_id));
        m.status = MissionStatus::Livraison;
        let chauffeur_actor = Actor::new(chauffeur_id, Role::Chauffeur);
        let err = apply(
            &mut m,
            &chauffeur_actor,
            MissionStatus::Incident,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ActorNotAllowed);
    }

    #[test]
    fn test_termine_requires_admin() {
        let chauffeur_id = Uuid::new_v4();
        let mut m = mission(Uuid::new_v4(), Some(chauffeur_id));
        m.status = MissionStatus::Livre;
        let chauffeur_actor = Actor::new(chauffeur_id, Role::Chauffeur);
        assert_eq!(
            apply(
                &mut m,
                &chauffeur_actor,
                MissionStatus::Termine,
                false,
                None,
                today(),
                Utc::now(),
            )
            .unwrap_err(),
            TransitionError::ActorNotAllowed
        );

        apply(
            &mut m,
            &admin(),
            MissionStatus::Termine,
            false,
            None,
            today(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(m.status, MissionStatus::Termine);
    }

    #[test]
    fn test_history_entry_records_edge() {
        let mut m = mission(Uuid::new_v4(), None);
        let actor = admin();
        let entry = apply(
            &mut m,
            &actor,
            MissionStatus::Accepte,
            false,
            Some("ok".to_string()),
            today(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(entry.mission_id, m.id);
        assert_eq!(entry.old_status, MissionStatus::EnAcceptation);
        assert_eq!(entry.new_status, MissionStatus::Accepte);
        assert_eq!(entry.changed_by, actor.user_id);
        assert_eq!(entry.notes.as_deref(), Some("ok"));
    }
}
