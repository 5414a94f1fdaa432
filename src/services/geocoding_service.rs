//! Servicio de geocoding y distancia
//!
//! Resuelve las direcciones de prise en charge y livraison a coordenadas y
//! calcula la distancia por carretera vía la API de Mapbox. Se usa a la
//! creación de la misión para rellenar distance_km y las coordenadas.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::errors::AppError;

/// Resultado de geocoding de una dirección
#[derive(Debug, Clone)]
pub struct GeocodedPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingResponse {
    features: Vec<MapboxFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxFeature {
    geometry: MapboxGeometry,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    /// [longitude, latitude]
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct MapboxDirectionsResponse {
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    /// metros
    distance: f64,
}

#[derive(Clone)]
pub struct GeocodingService {
    mapbox_token: String,
    client: reqwest::Client,
}

impl GeocodingService {
    pub fn new(mapbox_token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            mapbox_token,
            client,
        }
    }

    /// Geocodificar una dirección postal francesa
    pub async fn geocode_address(&self, address: &str) -> Result<GeocodedPoint, AppError> {
        tracing::info!("🗺️ Geocoding address: {}", address);

        let encoded_address = urlencoding::encode(address);
        let url = format!(
            "https://api.mapbox.com/search/geocode/v6/forward?q={}&access_token={}&country=fr&limit=1",
            encoded_address, self.mapbox_token
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "DkAutomotive/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("geocoding request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "geocoding failed with status {}",
                status
            )));
        }

        let body: MapboxGeocodingResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("invalid geocoding response: {}", e)))?;

        let feature = body
            .features
            .first()
            .filter(|f| f.geometry.coordinates.len() >= 2)
            .ok_or_else(|| {
                AppError::BadRequest(format!("no coordinates found for address '{}'", address))
            })?;

        Ok(GeocodedPoint {
            longitude: feature.geometry.coordinates[0],
            latitude: feature.geometry.coordinates[1],
        })
    }

    /// Distancia por carretera en kilómetros entre dos puntos geocodificados
    pub async fn route_distance_km(
        &self,
        from: &GeocodedPoint,
        to: &GeocodedPoint,
    ) -> Result<Decimal, AppError> {
        let url = format!(
            "https://api.mapbox.com/directions/v5/mapbox/driving/{},{};{},{}?access_token={}&overview=false",
            from.longitude, from.latitude, to.longitude, to.latitude, self.mapbox_token
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "DkAutomotive/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("directions request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "directions failed with status {}",
                status
            )));
        }

        let body: MapboxDirectionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("invalid directions response: {}", e)))?;

        let route = body.routes.first().ok_or_else(|| {
            AppError::BadRequest("no route found between pickup and delivery".to_string())
        })?;

        let km = Decimal::from_f64(route.distance / 1000.0)
            .ok_or_else(|| AppError::Internal("invalid distance value".to_string()))?;

        Ok(km.round_dp(1))
    }
}
