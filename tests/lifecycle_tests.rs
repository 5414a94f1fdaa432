//! Tests de integración del ciclo de vida de una misión
//!
//! Recorren el camino completo usando la máquina de estados en memoria,
//! verificando historial, fecha de completado y alcance por actor.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use dk_automotive::lifecycle::settlement::{apply_clear_invoice, apply_paid, SettlementError};
use dk_automotive::lifecycle::{apply, Actor};
use dk_automotive::models::mission::{Mission, MissionStatus, MissionType, VehicleCategory};
use dk_automotive::models::profile::Role;

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
        pickup_lat: Some(45.767),
        pickup_lng: Some(4.834),
        delivery_street: "4 avenue Foch".to_string(),
        delivery_city: "Paris".to_string(),
        delivery_postal_code: "75116".to_string(),
        delivery_country: "France".to_string(),
        delivery_lat: Some(48.871),
        delivery_lng: Some(2.287),
        distance_km: Decimal::new(100, 0),
        price_ht: Decimal::new(5000, 2),
        price_ttc: Decimal::new(6000, 2),
        vat_rate: Decimal::new(20, 0),
        chauffeur_price_ht: Some(Decimal::new(3500, 2)),
        chauffeur_invoice: None,
        chauffeur_paid: false,
        vehicle_category: VehicleCategory::Citadine,
        vehicle_make: Some("Renault".to_string()),
        vehicle_model: Some("Clio".to_string()),
        vehicle_year: Some(2021),
        vehicle_registration: Some("AB-123-CD".to_string()),
        vehicle_vin: None,
        vehicle_fuel: Some("essence".to_string()),
        pickup_contact_name: Some("Jean Dupont".to_string()),
        pickup_contact_phone: Some("0612345678".to_string()),
        pickup_contact_email: None,
        delivery_contact_name: Some("Marie Martin".to_string()),
        delivery_contact_phone: Some("0698765432".to_string()),
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

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[test]
fn test_full_happy_path_produces_complete_history() {
    let client_id = Uuid::new_v4();
    let chauffeur_id = Uuid::new_v4();
    let admin = Actor::new(Uuid::new_v4(), Role::Admin);
    let chauffeur = Actor::new(chauffeur_id, Role::Chauffeur);

    let mut m = mission(client_id, Some(chauffeur_id));
    m.d1_pec = Some(today());

    let mut history = Vec::new();

    // acceptation por el admin
    history.push(apply(&mut m, &admin, MissionStatus::Accepte, false, None, today(), Utc::now()).unwrap());
    assert_eq!(m.status, MissionStatus::Accepte);

    // el chauffeur asignado recoge el vehículo el día programado
    history.push(
        apply(&mut m, &chauffeur, MissionStatus::PriseEnCharge, false, None, today(), Utc::now())
            .unwrap(),
    );
    history.push(
        apply(&mut m, &chauffeur, MissionStatus::Livraison, false, None, today(), Utc::now())
            .unwrap(),
    );
    history.push(
        apply(&mut m, &chauffeur, MissionStatus::Livre, true, None, today(), Utc::now()).unwrap(),
    );
    assert!(m.completion_date.is_some());

    // cierre administrativo
    history.push(apply(&mut m, &admin, MissionStatus::Termine, false, None, today(), Utc::now()).unwrap());
    assert_eq!(m.status, MissionStatus::Termine);
    assert!(m.status.is_terminal());

    // una entrada de historial por transición, encadenadas sin huecos
    assert_eq!(history.len(), 5);
    for window in history.windows(2) {
        assert_eq!(window[0].new_status, window[1].old_status);
    }
    assert_eq!(history[0].old_status, MissionStatus::EnAcceptation);
    assert_eq!(history[4].new_status, MissionStatus::Termine);
}

#[test]
fn test_cancelled_mission_rejects_further_transitions() {
    let client_id = Uuid::new_v4();
    let client = Actor::new(client_id, Role::Client);
    let admin = Actor::new(Uuid::new_v4(), Role::Admin);

    let mut m = mission(client_id, None);
    apply(&mut m, &client, MissionStatus::Annule, false, None, today(), Utc::now()).unwrap();
    assert_eq!(m.status, MissionStatus::Annule);

    // ni siquiera el admin puede reactivar una misión anulada
    for target in [
        MissionStatus::Accepte,
        MissionStatus::PriseEnCharge,
        MissionStatus::Incident,
    ] {
        assert!(apply(&mut m, &admin, target, true, None, today(), Utc::now()).is_err());
    }
    assert_eq!(m.status, MissionStatus::Annule);
}

#[test]
fn test_rejected_transition_leaves_no_trace() {
    let chauffeur_id = Uuid::new_v4();
    let mut m = mission(Uuid::new_v4(), Some(chauffeur_id));
    m.status = MissionStatus::Livraison;
    let before = m.clone();

    let chauffeur = Actor::new(chauffeur_id, Role::Chauffeur);

    // sin confirmación explícita la entrega se rechaza y nada cambia
    let result = apply(&mut m, &chauffeur, MissionStatus::Livre, false, None, today(), Utc::now());
    assert!(result.is_err());
    assert_eq!(m.status, before.status);
    assert_eq!(m.completion_date, before.completion_date);
    assert_eq!(m.updated_at, before.updated_at);
}

#[test]
fn test_paid_flag_requires_attached_invoice() {
    let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
    m.status = MissionStatus::Livre;

    // sin factura el pago se rechaza y la misión no cambia
    assert_eq!(
        apply_paid(&mut m, true),
        Err(SettlementError::PaidWithoutInvoice)
    );
    assert!(!m.chauffeur_paid);

    m.chauffeur_invoice = Some(format!("driver_invoices/{}/facture.pdf", m.id));
    apply_paid(&mut m, true).unwrap();
    assert!(m.chauffeur_paid);
}

#[test]
fn test_deleting_invoice_resets_paid_flag() {
    let mut m = mission(Uuid::new_v4(), Some(Uuid::new_v4()));
    m.status = MissionStatus::Termine;
    m.chauffeur_invoice = Some(format!("driver_invoices/{}/facture.pdf", m.id));
    apply_paid(&mut m, true).unwrap();

    apply_clear_invoice(&mut m);
    assert!(m.chauffeur_invoice.is_none());
    assert!(!m.chauffeur_paid);

    // y sin factura ya no puede volver a marcarse pagada
    assert!(apply_paid(&mut m, true).is_err());

    // desmarcar siempre está permitido
    apply_paid(&mut m, false).unwrap();
    assert!(!m.chauffeur_paid);
}

#[test]
fn test_client_cannot_drive_execution_states() {
    let client_id = Uuid::new_v4();
    let client = Actor::new(client_id, Role::Client);

    let mut m = mission(client_id, Some(Uuid::new_v4()));
    m.status = MissionStatus::Accepte;
    m.d1_pec = Some(today());

    assert!(apply(&mut m, &client, MissionStatus::PriseEnCharge, false, None, today(), Utc::now())
        .is_err());

    m.status = MissionStatus::Livraison;
    assert!(apply(&mut m, &client, MissionStatus::Livre, true, None, today(), Utc::now()).is_err());
}
