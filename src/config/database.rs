//! Configuración de base de datos
//!
//! Pool de PostgreSQL con límites ajustables por entorno. El servicio es
//! mayormente I/O de corta duración (consultas por misión), así que el pool
//! por defecto es pequeño y el timeout de adquisición corto.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Configuración del pool de conexiones
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Leer la configuración del entorno; los límites del pool son opcionales
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set in environment variables"),
            max_connections: parse_pool_size(std::env::var("DATABASE_MAX_CONNECTIONS").ok(), 10),
            min_connections: parse_pool_size(std::env::var("DATABASE_MIN_CONNECTIONS").ok(), 2),
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
        }
    }

    /// Crear el pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .connect(&self.url)
            .await
    }
}

/// Parsear un límite del pool, cayendo al default si falta o es inválido
fn parse_pool_size(value: Option<String>, default: u32) -> u32 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pool_size_accepts_valid_values() {
        assert_eq!(parse_pool_size(Some("25".to_string()), 10), 25);
        assert_eq!(parse_pool_size(Some(" 5 ".to_string()), 10), 5);
    }

    #[test]
    fn test_parse_pool_size_falls_back_on_missing_or_invalid() {
        assert_eq!(parse_pool_size(None, 10), 10);
        assert_eq!(parse_pool_size(Some("abc".to_string()), 10), 10);
        assert_eq!(parse_pool_size(Some("0".to_string()), 10), 10);
    }
}
