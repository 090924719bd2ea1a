use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tivra_api::auth::jwt::JwtService;
use tivra_api::services::AuditLogger;
use tivra_api::{AppState, Config, database, router, utils};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tivra_api=info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration for environment: {}",
        config.environment
    );

    // Validate secrets before proceeding
    utils::validate_secrets(&config)?;

    // Setup database connection
    let db_pool = database::setup_database(&config.database_url, config.max_connections).await?;
    database::run_migrations(&db_pool).await?;

    let jwt_service = JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration,
        config.jwt_refresh_expiration,
    );
    let audit_logger = AuditLogger::new(db_pool.clone(), config.audit_log_enabled);

    let port = config.port;
    let app_state = AppState {
        db: db_pool,
        config,
        jwt_service,
        audit_logger,
    };

    let app = router::build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
