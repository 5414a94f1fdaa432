//! Motor de precios
//!
//! Lookup por tramo de distancia sobre la grilla de precios de la categoría
//! de vehículo, y cálculo de TTC a partir del HT y la tasa de TVA.
//! El cálculo puro está separado del lookup en base para poder testearlo.

use rust_decimal::Decimal;

use crate::models::mission::VehicleCategory;
use crate::models::pricing::{PriceQuote, PricingGrid};
use crate::utils::errors::AppError;

/// Resolución de los tramos: las distancias se redondean a 0.1 km, así que
/// dos tramos consecutivos no pueden dejar un hueco mayor que este paso.
fn bracket_step_km() -> Decimal {
    Decimal::new(1, 1)
}

/// Calcular el precio TTC: price_ht * (1 + vat_rate/100), redondeado a 2 decimales
pub fn compute_ttc(price_ht: Decimal, vat_rate: Decimal) -> Decimal {
    (price_ht * (Decimal::ONE + vat_rate / Decimal::new(100, 0))).round_dp(2)
}

/// Buscar el tramo aplicable para una categoría y distancia
///
/// Un tramo aplica si `min_km <= distance` y (`max_km` es NULL o
/// `distance <= max_km`).
pub fn find_bracket<'a>(
    grids: &'a [PricingGrid],
    category: VehicleCategory,
    distance_km: Decimal,
) -> Option<&'a PricingGrid> {
    grids.iter().find(|g| {
        g.vehicle_category == category
            && g.min_km <= distance_km
            && g.max_km.map_or(true, |max| distance_km <= max)
    })
}

/// Cotizar una misión: tramo de la grilla + TVA
pub fn quote(
    grids: &[PricingGrid],
    category: VehicleCategory,
    distance_km: Decimal,
    vat_rate: Decimal,
) -> Result<PriceQuote, AppError> {
    if distance_km <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "distance must be positive to compute a price".to_string(),
        ));
    }

    let bracket = find_bracket(grids, category, distance_km).ok_or_else(|| {
        AppError::BadRequest(format!(
            "no pricing bracket covers {} km for this vehicle category",
            distance_km
        ))
    })?;

    Ok(PriceQuote {
        distance_km,
        price_ht: bracket.price_ht.round_dp(2),
        price_ttc: compute_ttc(bracket.price_ht, vat_rate),
        vat_rate,
    })
}

/// Verificar que los tramos de una categoría cubren las distancias sin huecos
///
/// Las distancias llegan redondeadas a 0.1 km, así que un tramo 0-100 seguido
/// de 101-300 dejaría 100.4 km sin precio. Se exige que el siguiente `min_km`
/// quede a lo sumo a 0.1 km del `max_km` anterior, sin solaparse, y que solo
/// el último tramo sea abierto.
pub fn validate_contiguity(grids: &[PricingGrid]) -> Result<(), AppError> {
    let mut sorted: Vec<&PricingGrid> = grids.iter().collect();
    sorted.sort_by(|a, b| a.min_km.cmp(&b.min_km));

    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let max = lower.max_km.ok_or_else(|| {
            AppError::BadRequest(format!(
                "the open bracket starting at {} km must be the last one",
                lower.min_km
            ))
        })?;
        if upper.min_km <= max {
            return Err(AppError::BadRequest(format!(
                "brackets {}-{} and {}- overlap",
                lower.min_km, max, upper.min_km
            )));
        }
        if upper.min_km - max > bracket_step_km() {
            return Err(AppError::BadRequest(format!(
                "gap between {} km and {} km: distances in between would have no price",
                max, upper.min_km
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn grid(
        category: VehicleCategory,
        min_km: &str,
        max_km: Option<&str>,
        price_ht: Decimal,
    ) -> PricingGrid {
        PricingGrid {
            id: Uuid::new_v4(),
            vehicle_category: category,
            min_km: min_km.parse().unwrap(),
            max_km: max_km.map(|m| m.parse().unwrap()),
            price_ht,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compute_ttc_rounding() {
        // 50.00 HT al 20% => 60.00 TTC
        assert_eq!(
            compute_ttc(Decimal::new(5000, 2), Decimal::new(20, 0)),
            Decimal::new(6000, 2)
        );
        // 33.33 HT al 20% => 39.996 => 40.00
        assert_eq!(
            compute_ttc(Decimal::new(3333, 2), Decimal::new(20, 0)),
            Decimal::new(4000, 2)
        );
    }

    #[test]
    fn test_quote_picks_matching_bracket() {
        let grids = vec![
            grid(VehicleCategory::Citadine, "0", Some("100"), Decimal::new(5000, 2)),
            grid(VehicleCategory::Citadine, "100.1", Some("300"), Decimal::new(12000, 2)),
            grid(VehicleCategory::Citadine, "300.1", None, Decimal::new(25000, 2)),
            grid(VehicleCategory::Berline, "0", Some("100"), Decimal::new(7000, 2)),
        ];

        let q = quote(
            &grids,
            VehicleCategory::Citadine,
            Decimal::new(100, 0),
            Decimal::new(20, 0),
        )
        .unwrap();
        assert_eq!(q.price_ht, Decimal::new(5000, 2));
        assert_eq!(q.price_ttc, Decimal::new(6000, 2));

        // tramo abierto
        let q = quote(
            &grids,
            VehicleCategory::Citadine,
            Decimal::new(500, 0),
            Decimal::new(20, 0),
        )
        .unwrap();
        assert_eq!(q.price_ht, Decimal::new(25000, 2));
    }

    #[test]
    fn test_quote_covers_fractional_distances() {
        // las distancias llegan redondeadas a 0.1 km: con tramos contiguos
        // al paso de 0.1 ninguna cae en un hueco
        let grids = vec![
            grid(VehicleCategory::Citadine, "0", Some("100"), Decimal::new(5000, 2)),
            grid(VehicleCategory::Citadine, "100.1", Some("300"), Decimal::new(12000, 2)),
        ];
        validate_contiguity(&grids).unwrap();

        let q = quote(
            &grids,
            VehicleCategory::Citadine,
            "100.4".parse().unwrap(),
            Decimal::new(20, 0),
        )
        .unwrap();
        assert_eq!(q.price_ht, Decimal::new(12000, 2));
    }

    #[test]
    fn test_quote_rejects_uncovered_distance() {
        let grids = vec![grid(
            VehicleCategory::Berline,
            "0",
            Some("100"),
            Decimal::new(7000, 2),
        )];
        // categoría sin grilla
        assert!(quote(
            &grids,
            VehicleCategory::Citadine,
            Decimal::new(50, 0),
            Decimal::new(20, 0)
        )
        .is_err());
        // distancia fuera de todos los tramos
        assert!(quote(
            &grids,
            VehicleCategory::Berline,
            Decimal::new(150, 0),
            Decimal::new(20, 0)
        )
        .is_err());
    }

    #[test]
    fn test_quote_rejects_non_positive_distance() {
        let grids = vec![grid(
            VehicleCategory::Citadine,
            "0",
            None,
            Decimal::new(5000, 2),
        )];
        assert!(quote(
            &grids,
            VehicleCategory::Citadine,
            Decimal::ZERO,
            Decimal::new(20, 0)
        )
        .is_err());
    }

    #[test]
    fn test_contiguity_rejects_gaps_and_overlaps() {
        // hueco de 1 km: 100.4 no tendría precio
        let with_gap = vec![
            grid(VehicleCategory::Citadine, "0", Some("100"), Decimal::new(5000, 2)),
            grid(VehicleCategory::Citadine, "101", Some("300"), Decimal::new(12000, 2)),
        ];
        assert!(validate_contiguity(&with_gap).is_err());

        // solapamiento: 90 km tendría dos precios
        let overlapping = vec![
            grid(VehicleCategory::Citadine, "0", Some("100"), Decimal::new(5000, 2)),
            grid(VehicleCategory::Citadine, "90", Some("300"), Decimal::new(12000, 2)),
        ];
        assert!(validate_contiguity(&overlapping).is_err());
    }

    #[test]
    fn test_contiguity_requires_open_bracket_last() {
        let grids = vec![
            grid(VehicleCategory::Citadine, "0", None, Decimal::new(5000, 2)),
            grid(VehicleCategory::Citadine, "100.1", Some("300"), Decimal::new(12000, 2)),
        ];
        assert!(validate_contiguity(&grids).is_err());

        let single_open = vec![grid(VehicleCategory::Citadine, "0", None, Decimal::new(5000, 2))];
        validate_contiguity(&single_open).unwrap();
    }
}
