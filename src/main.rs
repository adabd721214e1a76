use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn, Level};

use acme_trans_backend::config::environment::EnvironmentConfig;
use acme_trans_backend::database::DatabaseConnection;
use acme_trans_backend::repositories::Repositories;
use acme_trans_backend::routes::create_router;
use acme_trans_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(parse_level(&config.log_level))
        .init();

    info!("🚚 ACME Trans - Backend de gestión logística");
    info!("   Entorno: {}", config.environment);

    // Inicializar base de datos (aplica las migraciones pendientes)
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let server_url = config.server_url();

    let state = AppState::new(config, Repositories::postgres(pool));
    let app = create_router(state);

    info!("🌐 Servidor iniciando en {}", server_url);
    info!("🔐 Auth:      POST /api/register, /api/token, /api/token/refresh");
    info!("🏢 Admin:     /api/admin/{{branches,clients,employees,trucks,orders}}");
    info!("📦 Clientes:  /api/my-orders");
    info!("📋 Selectores: /api/data/{{branches,drivers,trucks}}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

fn parse_level(value: &str) -> Level {
    match value.parse::<Level>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("LOG_LEVEL inválido '{}', usando INFO", value);
            Level::INFO
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
