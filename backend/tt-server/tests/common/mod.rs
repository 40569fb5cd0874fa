#![allow(dead_code)]

//! Test infrastructure for tt-server API tests

use tt_auth::{JwtIssuer, JwtValidator};
use tt_config::{ServerConfig, ValidationConfig};
use tt_server::build_router;
use tt_ws::{
    AppState, ConnectionConfig, ConnectionLimits, Metrics, ShutdownCoordinator, TenantBroadcaster,
};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::{TestServer, TestWebSocket, WsMessage};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes!!";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(":memory:")
                .foreign_keys(true),
        )
        .await
        .expect("Failed to create test database");

    tt_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let metrics = Metrics::new();

    AppState {
        pool,
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_JWT_SECRET)),
        jwt_issuer: Arc::new(JwtIssuer::with_hs256(TEST_JWT_SECRET, 60)),
        broadcaster: TenantBroadcaster::new(metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        limits: ConnectionLimits::default(),
        validation: ValidationConfig::default(),
    }
}

/// Router with permissive CORS and no static files
pub fn create_router(state: AppState) -> Router {
    let server = ServerConfig {
        cors_origins: Vec::new(),
        ..Default::default()
    };
    build_router(state, &server)
}

/// A running app plus its state, for tests that need both HTTP and WebSocket clients
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Credentials returned by signup
pub struct Account {
    pub token: String,
    pub user_id: i64,
    pub tenant_id: i64,
}

impl Account {
    pub fn tenant_key(&self) -> String {
        self.tenant_id.to_string()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let state = create_test_app_state().await;
        let server = TestServer::builder()
            .http_transport()
            .build(create_router(state.clone()))
            .expect("Failed to create test server");

        Self { server, state }
    }

    /// Sign up a new tenant; the returned account is its admin
    pub async fn signup(&self, email: &str, tenant_name: &str) -> Account {
        let response = self
            .server
            .post("/auth/signup")
            .json(&json!({
                "email": email,
                "password": "correct horse",
                "tenant_name": tenant_name,
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        Account {
            token: body["access_token"].as_str().unwrap().to_string(),
            user_id: body["user"]["id"].as_i64().unwrap(),
            tenant_id: body["user"]["tenant_id"].as_i64().unwrap(),
        }
    }

    /// Invite a member into `admin`'s tenant and log them in
    pub async fn invite(&self, admin: &Account, email: &str) -> Account {
        let response = self
            .server
            .post("/users/invite")
            .authorization_bearer(&admin.token)
            .json(&json!({"email": email, "password": "member pw"}))
            .await;
        response.assert_status_ok();
        let user: Value = response.json();

        let login = self
            .server
            .post("/auth/login")
            .json(&json!({"email": email, "password": "member pw"}))
            .await;
        login.assert_status_ok();
        let token: Value = login.json();

        Account {
            token: token["access_token"].as_str().unwrap().to_string(),
            user_id: user["id"].as_i64().unwrap(),
            tenant_id: user["tenant_id"].as_i64().unwrap(),
        }
    }

    pub async fn create_task(&self, account: &Account, body: Value) -> Value {
        let response = self
            .server
            .post("/tasks")
            .authorization_bearer(&account.token)
            .json(&body)
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Open a WebSocket on the account's tenant and wait until it is registered
    pub async fn subscribe(&self, account: &Account) -> TestWebSocket {
        let key = account.tenant_key();
        let before = self.state.broadcaster.subscriber_count(&key).await;

        let ws = self
            .server
            .get_websocket(&format!("/ws/{}", key))
            .add_query_param("token", &account.token)
            .await
            .into_websocket()
            .await;

        self.wait_for_subscribers(&key, before + 1).await;
        ws
    }

    /// Registration happens after the upgrade response; poll for it
    pub async fn wait_for_subscribers(&self, tenant_key: &str, expected: usize) {
        for _ in 0..200 {
            if self.state.broadcaster.subscriber_count(tenant_key).await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("tenant {tenant_key} never reached {expected} subscribers");
    }
}

/// Next text frame as JSON, failing the test after a second
pub async fn next_event(ws: &mut TestWebSocket) -> Value {
    let text = tokio::time::timeout(Duration::from_secs(1), ws.receive_text())
        .await
        .expect("no event received");
    serde_json::from_str(&text).expect("frame should be JSON")
}

/// True when nothing arrives within a short window
pub async fn stays_silent(ws: &mut TestWebSocket) -> bool {
    tokio::time::timeout(Duration::from_millis(200), ws.receive_text())
        .await
        .is_err()
}

/// Close code of the next close frame, skipping pings; `None` if the socket ends without one
pub async fn next_close_code(ws: &mut TestWebSocket) -> Option<u16> {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(1), ws.receive_message())
            .await
            .expect("no close frame received");
        match message {
            WsMessage::Close(frame) => return frame.map(|f| u16::from(f.code)),
            WsMessage::Ping(_) | WsMessage::Pong(_) => continue,
            other => panic!("expected close frame, got {:?}", other),
        }
    }
}
