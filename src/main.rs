use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use vehicle_logbook::config::environment::EnvironmentConfig;
use vehicle_logbook::database::create_pool;
use vehicle_logbook::routes::create_router;
use vehicle_logbook::state::AppState;
use vehicle_logbook::storage::{MemoryStorage, S3Storage, StorageGateway};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Logbook - API de vehículos y mantenimiento");
    info!("=====================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar storage
    let storage: Arc<dyn StorageGateway> = match &config.s3_bucket {
        Some(bucket) => {
            let s3 = S3Storage::new(
                bucket.clone(),
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
                config.s3_access_key.clone(),
                config.s3_secret_key.clone(),
            )
            .map_err(|e| anyhow::anyhow!("Error de storage: {}", e))?;
            info!("✅ Storage S3 configurado (bucket: {})", bucket);
            Arc::new(s3)
        }
        None => {
            warn!("⚠️ S3_BUCKET no configurado, usando storage en memoria");
            Arc::new(MemoryStorage::new())
        }
    };

    let app_state = AppState::new(pool, config.clone(), storage);
    let app = create_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /auth/register - Registrar usuario");
    info!("   POST /auth/login - Login");
    info!("🚗 Endpoints - Vehicles:");
    info!("   POST /vehicles - Crear vehículo (form multipart)");
    info!("   GET  /vehicles - Listar vehículos");
    info!("   GET  /vehicles/:id - Obtener vehículo");
    info!("   PUT  /vehicles/:id - Actualizar vehículo");
    info!("   DELETE /vehicles/:id - Eliminar vehículo");
    info!("🛠 Endpoints - Logs:");
    info!("   POST /vehicles/:id/logs - Crear log (form multipart)");
    info!("   GET  /vehicles/:id/logs - Listar logs");
    info!("   GET  /vehicles/:id/logs/:logId - Obtener log");
    info!("   DELETE /vehicles/:id/logs/:logId - Eliminar log");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
