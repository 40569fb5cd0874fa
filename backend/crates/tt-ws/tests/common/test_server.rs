#![allow(dead_code)]

use tt_auth::{JwtIssuer, JwtValidator, hash_password};
use tt_config::ValidationConfig;
use tt_core::{NewUser, Tenant, User, UserRole};
use tt_db::{TenantRepository, UserRepository};
use tt_ws::{
    AppState, ConnectionConfig, ConnectionLimits, Metrics, ShutdownCoordinator, TenantBroadcaster,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Default JWT secret for all tests (HS256 requires at least 32 bytes)
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub require_token: bool,
    pub max_per_tenant: usize,
    pub max_total: usize,
    pub connection: ConnectionConfig,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            require_token: true,
            max_per_tenant: 100,
            max_total: 100,
            connection: ConnectionConfig::default(),
        }
    }
}

impl TestServerConfig {
    /// Handshake accepted without a token
    pub fn without_auth() -> Self {
        Self {
            require_token: false,
            ..Default::default()
        }
    }

    /// Millisecond heartbeat so silent clients are dropped quickly
    pub fn with_heartbeat(interval: Duration, timeout: Duration) -> Self {
        Self {
            connection: ConnectionConfig {
                heartbeat_interval: interval,
                heartbeat_timeout: timeout,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_send_buffer(size: usize) -> Self {
        Self {
            connection: ConnectionConfig {
                send_buffer_size: size,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_strict_limits() -> Self {
        Self {
            max_per_tenant: 2,
            max_total: 3,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

impl TestServerWithState {
    /// Insert a tenant with an admin and return a token for that admin
    pub async fn seed_tenant(&self, name: &str) -> (Tenant, User, String) {
        let admin = NewUser {
            email: format!("admin@{}.test", name),
            password_hash: hash_password("password").unwrap(),
            tenant_id: 0,
            role: UserRole::Admin,
        };
        let (tenant, user) = TenantRepository::new(self.app_state.pool.clone())
            .create_with_admin(name, &admin)
            .await
            .unwrap();
        let token = self.app_state.jwt_issuer.issue(&user).unwrap();
        (tenant, user, token)
    }

    pub async fn seed_member(&self, tenant: &Tenant, email: &str) -> (User, String) {
        let user = UserRepository::new(self.app_state.pool.clone())
            .create(&NewUser {
                email: email.to_string(),
                password_hash: hash_password("password").unwrap(),
                tenant_id: tenant.id,
                role: UserRole::Member,
            })
            .await
            .unwrap();
        let token = self.app_state.jwt_issuer.issue(&user).unwrap();
        (user, token)
    }

    /// Token for `user` that expires `secs` seconds from now
    pub fn token_expiring_in(&self, user: &User, secs: i64) -> String {
        let mut claims = self.app_state.jwt_issuer.claims_for(user);
        claims.exp = chrono::Utc::now().timestamp() + secs;
        self.app_state.jwt_issuer.encode(&claims).unwrap()
    }

    /// Registration happens after the upgrade response; wait for it
    pub async fn wait_for_subscribers(&self, tenant_id: &str, expected: usize) {
        wait_for_subscribers(&self.app_state.broadcaster, tenant_id, expected).await;
    }
}

pub async fn wait_for_subscribers(broadcaster: &TenantBroadcaster, tenant_id: &str, expected: usize) {
    for _ in 0..200 {
        if broadcaster.subscriber_count(tenant_id).await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "tenant {} never reached {} subscribers (has {})",
        tenant_id,
        expected,
        broadcaster.subscriber_count(tenant_id).await
    );
}

pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    tt_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create a TestServer with default configuration
pub async fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default()).await
}

/// Create a TestServer with custom configuration
pub async fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let pool = create_test_pool().await;
    let metrics = Metrics::default();

    let app_state = AppState {
        pool,
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_JWT_SECRET)),
        jwt_issuer: Arc::new(JwtIssuer::with_hs256(TEST_JWT_SECRET, 60)),
        broadcaster: TenantBroadcaster::new(metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            require_token: config.require_token,
            ..config.connection
        },
        limits: ConnectionLimits {
            max_per_tenant: config.max_per_tenant,
            max_total: config.max_total,
        },
        validation: ValidationConfig::default(),
    };

    let router = Router::new()
        .route("/ws/{tenant_id}", get(tt_ws::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(router)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}
