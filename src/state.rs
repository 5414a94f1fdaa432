//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::geocoding_service::GeocodingService;
use crate::services::storage_service::StorageService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub storage: StorageService,
    pub geocoding: GeocodingService,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        storage: StorageService,
        geocoding: GeocodingService,
    ) -> Self {
        Self {
            pool,
            config,
            storage,
            geocoding,
        }
    }
}
