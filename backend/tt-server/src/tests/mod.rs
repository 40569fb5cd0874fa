mod api;

use tt_auth::{JwtIssuer, JwtValidator};
use tt_config::ValidationConfig;
use tt_ws::{
    AppState, ConnectionConfig, ConnectionLimits, Metrics, ShutdownCoordinator, TenantBroadcaster,
};

use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub(crate) const TEST_SECRET: &[u8] = b"unit-test-secret-that-is-long-enough-for-hs256";

pub(crate) async fn create_test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(":memory:")
                .foreign_keys(true),
        )
        .await
        .expect("Failed to create test pool");

    tt_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let metrics = Metrics::new();

    AppState {
        pool,
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_SECRET)),
        jwt_issuer: Arc::new(JwtIssuer::with_hs256(TEST_SECRET, 60)),
        broadcaster: TenantBroadcaster::new(metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        limits: ConnectionLimits::default(),
        validation: ValidationConfig::default(),
    }
}
