//! Controller de misiones
//!
//! Creación (geocoding + tarificación automática), consulta con alcance por
//! rol, edición admin, y transiciones de estado pasando por la máquina de
//! estados y el update condicional del repositorio.

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::lifecycle::{self, Actor, Capabilities};
use crate::models::mission::{
    CreateMissionRequest, Mission, MissionFilters, MissionStatus, MissionStatusHistory,
    TransitionMissionRequest, UpdateMissionRequest,
};
use crate::models::profile::Role;
use crate::repositories::mission_repository::MissionRepository;
use crate::repositories::pricing_repository::PricingRepository;
use crate::services::geocoding_service::GeocodingService;
use crate::services::pricing_service;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct MissionController {
    missions: MissionRepository,
    pricing: PricingRepository,
    geocoding: GeocodingService,
}

impl MissionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            missions: MissionRepository::new(state.pool.clone()),
            pricing: PricingRepository::new(state.pool.clone()),
            geocoding: state.geocoding.clone(),
        }
    }

    /// Crear una misión: geocodifica ambas direcciones, calcula la distancia
    /// por carretera y cotiza con la grilla de precios vigente
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateMissionRequest,
    ) -> Result<Mission, AppError> {
        request.validate()?;

        let is_admin = actor.role == Role::Admin;

        // el cliente crea para sí mismo; el admin debe indicar el cliente
        let client_id = match actor.role {
            Role::Client => actor.user_id,
            Role::Admin => request.client_id.ok_or_else(|| {
                AppError::BadRequest("client_id is required when creating as admin".to_string())
            })?,
            Role::Chauffeur => {
                return Err(AppError::Forbidden(
                    "chauffeurs cannot create missions".to_string(),
                ))
            }
        };

        if !is_admin
            && (request.chauffeur_id.is_some()
                || request.chauffeur_price_ht.is_some()
                || request.price_ht.is_some())
        {
            return Err(AppError::Forbidden(
                "only admins can assign a chauffeur or override pricing".to_string(),
            ));
        }

        let pickup_full = format!(
            "{}, {} {}, {}",
            request.pickup_address.street,
            request.pickup_address.postal_code,
            request.pickup_address.city,
            request.pickup_address.country
        );
        let delivery_full = format!(
            "{}, {} {}, {}",
            request.delivery_address.street,
            request.delivery_address.postal_code,
            request.delivery_address.city,
            request.delivery_address.country
        );

        let pickup_point = self.geocoding.geocode_address(&pickup_full).await?;
        let delivery_point = self.geocoding.geocode_address(&delivery_full).await?;
        let distance_km = self
            .geocoding
            .route_distance_km(&pickup_point, &delivery_point)
            .await?;

        let grids = self
            .pricing
            .grids_for_category(request.vehicle_category)
            .await?;
        let vat_rate = self.pricing.active_vat_rate().await?;
        let mut quote =
            pricing_service::quote(&grids, request.vehicle_category, distance_km, vat_rate)?;

        // override admin del precio calculado por la grilla
        if let Some(price_ht) = request.price_ht {
            if price_ht <= rust_decimal::Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "price_ht override must be positive".to_string(),
                ));
            }
            quote.price_ht = price_ht.round_dp(2);
            quote.price_ttc = pricing_service::compute_ttc(price_ht, vat_rate);
        }

        let now = Utc::now();
        let mission = Mission {
            id: Uuid::new_v4(),
            status: MissionStatus::EnAcceptation,
            mission_type: request.mission_type,
            client_id,
            chauffeur_id: request.chauffeur_id,
            pickup_street: request.pickup_address.street,
            pickup_city: request.pickup_address.city,
            pickup_postal_code: request.pickup_address.postal_code,
            pickup_country: request.pickup_address.country,
            pickup_lat: Some(pickup_point.latitude),
            pickup_lng: Some(pickup_point.longitude),
            delivery_street: request.delivery_address.street,
            delivery_city: request.delivery_address.city,
            delivery_postal_code: request.delivery_address.postal_code,
            delivery_country: request.delivery_address.country,
            delivery_lat: Some(delivery_point.latitude),
            delivery_lng: Some(delivery_point.longitude),
            distance_km: quote.distance_km,
            price_ht: quote.price_ht,
            price_ttc: quote.price_ttc,
            vat_rate: quote.vat_rate,
            chauffeur_price_ht: request.chauffeur_price_ht,
            chauffeur_invoice: None,
            chauffeur_paid: false,
            vehicle_category: request.vehicle_category,
            vehicle_make: request.vehicle_make,
            vehicle_model: request.vehicle_model,
            vehicle_year: request.vehicle_year,
            vehicle_registration: request.vehicle_registration,
            vehicle_vin: request.vehicle_vin,
            vehicle_fuel: request.vehicle_fuel,
            pickup_contact_name: request.pickup_contact.as_ref().map(|c| c.name.clone()),
            pickup_contact_phone: request.pickup_contact.as_ref().map(|c| c.phone.clone()),
            pickup_contact_email: request
                .pickup_contact
                .as_ref()
                .and_then(|c| c.email.clone()),
            delivery_contact_name: request.delivery_contact.as_ref().map(|c| c.name.clone()),
            delivery_contact_phone: request.delivery_contact.as_ref().map(|c| c.phone.clone()),
            delivery_contact_email: request
                .delivery_contact
                .as_ref()
                .and_then(|c| c.email.clone()),
            d1_pec: request.d1_pec,
            h1_pec: request.h1_pec,
            h2_pec: request.h2_pec,
            d2_liv: request.d2_liv,
            h1_liv: request.h1_liv,
            h2_liv: request.h2_liv,
            notes: request.notes,
            created_at: now,
            updated_at: now,
            completion_date: None,
        };

        let created = self.missions.insert(&mission).await?;
        tracing::info!(
            "🚗 created mission {} for client {} ({} km, {} € TTC)",
            created.id,
            created.client_id,
            created.distance_km,
            created.price_ttc
        );

        Ok(created)
    }

    /// Obtener una misión visible para el actor
    pub async fn get(&self, actor: &Actor, id: Uuid) -> Result<Mission, AppError> {
        let mission = self
            .missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", id)))?;

        self.check_visibility(actor, &mission)?;

        Ok(mission)
    }

    /// Listar misiones; el alcance de los filtros se fuerza según el rol
    pub async fn list(
        &self,
        actor: &Actor,
        mut filters: MissionFilters,
    ) -> Result<Vec<Mission>, AppError> {
        match actor.role {
            Role::Admin => {}
            Role::Client => filters.client_id = Some(actor.user_id),
            Role::Chauffeur => filters.chauffeur_id = Some(actor.user_id),
        }

        self.missions.list(&filters).await
    }

    /// Edición admin de los campos mutables de la misión
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        request: UpdateMissionRequest,
    ) -> Result<Mission, AppError> {
        request.validate()?;

        let mut mission = self
            .missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", id)))?;

        let caps = Capabilities::resolve(actor, &mission);
        if !caps.can_edit_mission(&mission) {
            return Err(AppError::Forbidden(
                "only admins can edit a non-terminal mission".to_string(),
            ));
        }

        if let Some(price_ht) = request.price_ht {
            mission.price_ht = price_ht.round_dp(2);
            mission.price_ttc = pricing_service::compute_ttc(price_ht, mission.vat_rate);
        }
        if request.chauffeur_id.is_some() {
            mission.chauffeur_id = request.chauffeur_id;
        }
        if request.chauffeur_price_ht.is_some() {
            mission.chauffeur_price_ht = request.chauffeur_price_ht;
        }

        if request.vehicle_make.is_some() {
            mission.vehicle_make = request.vehicle_make;
        }
        if request.vehicle_model.is_some() {
            mission.vehicle_model = request.vehicle_model;
        }
        if request.vehicle_year.is_some() {
            mission.vehicle_year = request.vehicle_year;
        }
        if request.vehicle_registration.is_some() {
            mission.vehicle_registration = request.vehicle_registration;
        }
        if request.vehicle_vin.is_some() {
            mission.vehicle_vin = request.vehicle_vin;
        }
        if request.vehicle_fuel.is_some() {
            mission.vehicle_fuel = request.vehicle_fuel;
        }

        if let Some(contact) = request.pickup_contact {
            mission.pickup_contact_name = Some(contact.name);
            mission.pickup_contact_phone = Some(contact.phone);
            mission.pickup_contact_email = contact.email;
        }
        if let Some(contact) = request.delivery_contact {
            mission.delivery_contact_name = Some(contact.name);
            mission.delivery_contact_phone = Some(contact.phone);
            mission.delivery_contact_email = contact.email;
        }

        if request.d1_pec.is_some() {
            mission.d1_pec = request.d1_pec;
        }
        if request.h1_pec.is_some() {
            mission.h1_pec = request.h1_pec;
        }
        if request.h2_pec.is_some() {
            mission.h2_pec = request.h2_pec;
        }
        if request.d2_liv.is_some() {
            mission.d2_liv = request.d2_liv;
        }
        if request.h1_liv.is_some() {
            mission.h1_liv = request.h1_liv;
        }
        if request.h2_liv.is_some() {
            mission.h2_liv = request.h2_liv;
        }
        if request.notes.is_some() {
            mission.notes = request.notes;
        }

        self.missions.update_details(&mission).await
    }

    /// Transicionar el estado de una misión
    ///
    /// La validación y la mutación en memoria las hace la máquina de estados;
    /// la persistencia pasa por el update condicional del repositorio, que
    /// detecta carreras entre actores concurrentes.
    pub async fn transition(
        &self,
        actor: &Actor,
        id: Uuid,
        request: TransitionMissionRequest,
    ) -> Result<Mission, AppError> {
        let mut mission = self
            .missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", id)))?;

        let expected = mission.status;
        let now = Utc::now();
        let today = now.date_naive();

        let entry = lifecycle::apply(
            &mut mission,
            actor,
            request.target_status,
            request.confirmed,
            request.notes,
            today,
            now,
        )?;

        let updated = self
            .missions
            .transition(id, expected, &entry, mission.completion_date)
            .await?;

        tracing::info!(
            "🔄 mission {} transitioned {} → {} by {}",
            id,
            entry.old_status.as_str(),
            entry.new_status.as_str(),
            entry.changed_by
        );

        Ok(updated)
    }

    /// Anular una misión (azúcar sobre la transición a `annule`)
    pub async fn cancel(
        &self,
        actor: &Actor,
        id: Uuid,
        notes: Option<String>,
    ) -> Result<Mission, AppError> {
        self.transition(
            actor,
            id,
            TransitionMissionRequest {
                target_status: MissionStatus::Annule,
                confirmed: false,
                notes,
            },
        )
        .await
    }

    /// Historial de estados de una misión visible para el actor
    pub async fn history(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> Result<Vec<MissionStatusHistory>, AppError> {
        let mission = self
            .missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", id)))?;

        self.check_visibility(actor, &mission)?;

        self.missions.history(id).await
    }

    /// Marcar o desmarcar el pago del chauffeur (solo admin)
    pub async fn set_paid(&self, actor: &Actor, id: Uuid, paid: bool) -> Result<(), AppError> {
        let mission = self
            .missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mission '{}' not found", id)))?;

        let caps = Capabilities::resolve(actor, &mission);
        if !caps.can_toggle_paid() {
            return Err(AppError::Forbidden(
                "only admins can change the payment flag".to_string(),
            ));
        }

        if !lifecycle::settlement::can_set_paid(paid, mission.chauffeur_invoice.as_deref()) {
            return Err(lifecycle::SettlementError::PaidWithoutInvoice.into());
        }

        // El UPDATE condicional re-verifica la factura por si fue borrada
        // entre la lectura y la escritura
        self.missions.set_paid(id, paid).await
    }

    fn check_visibility(&self, actor: &Actor, mission: &Mission) -> Result<(), AppError> {
        let caps = Capabilities::resolve(actor, mission);
        if caps.is_admin || caps.is_owner_client || caps.is_assigned_chauffeur {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "you do not have access to this mission".to_string(),
            ))
        }
    }
}
