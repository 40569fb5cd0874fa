use tt_server::{build_router, error::ServerError, logger, metrics};

use tt_auth::{JwtIssuer, JwtValidator};
use tt_config::{Config, ConfigError};
use tt_ws::{
    AppState, ConnectionConfig, ConnectionLimits, Metrics, ShutdownCoordinator, TenantBroadcaster,
};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path = match config.logging.file {
        Some(ref filename) => {
            let log_dir = Config::config_dir()?.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir).map_err(ServerError::Io)?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting tt-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let prometheus = metrics::install_recorder()?;

    // Database pool + migrations
    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let pool = tt_db::create_pool(&database_path, config.database.max_connections)
        .await
        .map_err(ServerError::Database)?;

    // validate() guarantees a secret is present
    let secret = config
        .auth
        .jwt_secret
        .as_deref()
        .ok_or_else(|| ServerError::Config(ConfigError::auth("auth.jwt_secret is required")))?;
    let jwt_validator = Arc::new(JwtValidator::with_hs256(secret.as_bytes()));
    let jwt_issuer = Arc::new(JwtIssuer::with_hs256(
        secret.as_bytes(),
        config.auth.token_ttl_minutes,
    ));
    info!("JWT: HS256 authentication enabled");

    if !config.websocket.require_token {
        warn!("WebSocket token check DISABLED - any client can subscribe to any tenant");
    }

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        pool,
        jwt_validator,
        jwt_issuer,
        broadcaster: TenantBroadcaster::new(metrics.clone()),
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig::from(&config.websocket),
        limits: ConnectionLimits::from(&config),
        validation: config.validation.clone(),
    };

    let app = build_router(app_state, &config.server).merge(metrics::metrics_router(prometheus));

    let listener = TcpListener::bind(config.bind_addr()).await?;

    // Actual address matters when port is 0 / auto-assigned
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let mut shutdown_guard = shutdown.subscribe_guard();

    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}
