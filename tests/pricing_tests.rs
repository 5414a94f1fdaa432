//! Tests de integración del motor de precios

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use dk_automotive::models::mission::VehicleCategory;
use dk_automotive::models::pricing::PricingGrid;
use dk_automotive::services::pricing_service::{compute_ttc, quote, validate_contiguity};

fn grid(category: VehicleCategory, min_km: &str, max_km: Option<&str>, price_ht: &str) -> PricingGrid {
    PricingGrid {
        id: Uuid::new_v4(),
        vehicle_category: category,
        min_km: min_km.parse().unwrap(),
        max_km: max_km.map(|m| m.parse().unwrap()),
        price_ht: price_ht.parse().unwrap(),
        created_at: Utc::now(),
    }
}

// Tramos contiguos al paso de 0.1 km, el mismo que usa la distancia calculada
fn french_grids() -> Vec<PricingGrid> {
    vec![
        grid(VehicleCategory::Citadine, "0", Some("100"), "50.00"),
        grid(VehicleCategory::Citadine, "100.1", Some("300"), "120.00"),
        grid(VehicleCategory::Citadine, "300.1", None, "250.00"),
        grid(VehicleCategory::Utilitaire, "0", Some("100"), "90.00"),
        grid(VehicleCategory::Utilitaire, "100.1", None, "200.00"),
    ]
}

#[test]
fn test_quote_citadine_100km_at_french_vat() {
    let q = quote(
        &french_grids(),
        VehicleCategory::Citadine,
        Decimal::new(100, 0),
        Decimal::new(20, 0),
    )
    .unwrap();

    assert_eq!(q.price_ht, Decimal::new(5000, 2));
    assert_eq!(q.price_ttc, Decimal::new(6000, 2));
    assert_eq!(q.vat_rate, Decimal::new(20, 0));
}

#[test]
fn test_bracket_boundaries_are_inclusive() {
    let grids = french_grids();

    // 100 km cae en el primer tramo, 100.1 en el segundo
    let q100 = quote(&grids, VehicleCategory::Citadine, Decimal::new(100, 0), Decimal::new(20, 0))
        .unwrap();
    let q101 = quote(&grids, VehicleCategory::Citadine, "100.1".parse().unwrap(), Decimal::new(20, 0))
        .unwrap();
    assert_eq!(q100.price_ht, Decimal::new(5000, 2));
    assert_eq!(q101.price_ht, Decimal::new(12000, 2));
}

#[test]
fn test_every_rounded_distance_has_a_price() {
    let grids = french_grids();

    // la grilla de cada categoría es contigua al paso de 0.1 km
    let citadine: Vec<PricingGrid> = grids
        .iter()
        .filter(|g| g.vehicle_category == VehicleCategory::Citadine)
        .cloned()
        .collect();
    validate_contiguity(&citadine).unwrap();

    // una distancia con decimal cerca del borde de tramo obtiene precio
    let q = quote(&grids, VehicleCategory::Citadine, "100.4".parse().unwrap(), Decimal::new(20, 0))
        .unwrap();
    assert_eq!(q.price_ht, Decimal::new(12000, 2));

    // una grilla con hueco de 1 km se rechaza al administrarla
    let with_gap = vec![
        grid(VehicleCategory::Berline, "0", Some("100"), "70.00"),
        grid(VehicleCategory::Berline, "101", None, "150.00"),
    ];
    assert!(validate_contiguity(&with_gap).is_err());
}

#[test]
fn test_open_bracket_covers_long_distances() {
    let q = quote(
        &french_grids(),
        VehicleCategory::Citadine,
        Decimal::new(1500, 0),
        Decimal::new(20, 0),
    )
    .unwrap();
    assert_eq!(q.price_ht, Decimal::new(25000, 2));
}

#[test]
fn test_categories_do_not_cross() {
    // misma distancia, categorías distintas, precios distintos
    let grids = french_grids();
    let citadine =
        quote(&grids, VehicleCategory::Citadine, Decimal::new(50, 0), Decimal::new(20, 0)).unwrap();
    let utilitaire =
        quote(&grids, VehicleCategory::Utilitaire, Decimal::new(50, 0), Decimal::new(20, 0))
            .unwrap();
    assert_ne!(citadine.price_ht, utilitaire.price_ht);
}

#[test]
fn test_missing_category_is_rejected() {
    assert!(quote(
        &french_grids(),
        VehicleCategory::PoidsLourd,
        Decimal::new(50, 0),
        Decimal::new(20, 0)
    )
    .is_err());
}

#[test]
fn test_ttc_rounds_half_up_to_cents() {
    // 10.01 HT al 5.5% => 10.56055 => 10.56
    assert_eq!(
        compute_ttc(Decimal::new(1001, 2), Decimal::new(55, 1)),
        Decimal::new(1056, 2)
    );
}
