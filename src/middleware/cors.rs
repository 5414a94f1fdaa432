//! Middleware de CORS
//!
//! Una sola capa construida desde CORS_ORIGINS: sin orígenes configurados
//! (desarrollo) se acepta cualquier origen; con orígenes, solo los listados,
//! limitados a los métodos y headers que la API realmente usa.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Capa de CORS según los orígenes configurados
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(origins)))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Los orígenes que no son un header válido se descartan con un warning
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️ Origen CORS inválido, ignorado: {}", origin);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_keeps_valid_urls() {
        let origins = vec![
            "https://app.dk-automotive.fr".to_string(),
            "http://localhost:5173".to_string(),
        ];
        assert_eq!(parse_origins(&origins).len(), 2);
    }

    #[test]
    fn test_parse_origins_drops_invalid_values() {
        let origins = vec![
            "https://app.dk-automotive.fr".to_string(),
            "no es un header\nválido".to_string(),
        ];
        assert_eq!(parse_origins(&origins).len(), 1);
    }
}
