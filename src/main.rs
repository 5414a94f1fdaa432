use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use dk_automotive::config::database::DatabaseConfig;
use dk_automotive::config::environment::EnvironmentConfig;
use dk_automotive::database;
use dk_automotive::routes::create_router;
use dk_automotive::services::geocoding_service::GeocodingService;
use dk_automotive::services::storage_service::StorageService;
use dk_automotive::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 DK Automotive - API de convoyage");
    info!("===================================");

    let config = EnvironmentConfig::default();
    let db_config = DatabaseConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    database::run_migrations(&pool).await?;

    // Inicializar servicios externos
    let storage = StorageService::new(
        config.uploads_bucket.clone(),
        config.uploads_public_url.clone(),
    )
    .await;
    let geocoding = GeocodingService::new(config.mapbox_token.clone());

    let server_url = config.server_url();
    let state = AppState::new(pool, config, storage, geocoding);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    info!("🚀 Servidor escuchando en {}", server_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor detenido");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C recibido, cerrando..."),
        _ = terminate => info!("🛑 SIGTERM recibido, cerrando..."),
    }
}
