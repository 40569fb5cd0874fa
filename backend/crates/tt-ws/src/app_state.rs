use crate::{
    ConnectionConfig, ConnectionId, ConnectionLimits, Metrics, ShutdownCoordinator, Subscriber,
    TenantBroadcaster, WebSocketConnection, create_connection_span,
};

use tt_auth::{JwtIssuer, JwtValidator, TenantContext, extract_bearer};
use tt_config::ValidationConfig;
use tt_db::UserRepository;

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::Response,
};
use log::{debug, error, warn};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::Instrument;

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_validator: Arc<JwtValidator>,
    pub jwt_issuer: Arc<JwtIssuer>,
    pub broadcaster: TenantBroadcaster,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    pub limits: ConnectionLimits,
    pub validation: ValidationConfig,
}

/// Query string accepted on `/ws/{tenant_id}`; browsers cannot set headers on upgrade
#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// WebSocket upgrade handler for `/ws/{tenant_id}`
pub async fn handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let subscriber = if state.config.require_token {
        Some(authorize(&state, &tenant_id, params.token.as_deref(), &headers).await?)
    } else {
        None
    };

    check_limits(&state, &tenant_id).await?;

    debug!("WebSocket upgrade accepted for tenant {}", tenant_id);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, tenant_id, subscriber, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    tenant_id: String,
    subscriber: Option<Subscriber>,
    state: AppState,
) {
    let connection_id = ConnectionId::new();
    let span = create_connection_span(&tenant_id, connection_id);
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        connection_id,
        tenant_id,
        state.config.clone(),
        state.limits.clone(),
        state.metrics.clone(),
        state.broadcaster.clone(),
    )
    .with_subscriber(subscriber);

    if let Err(e) = connection
        .handle(socket, shutdown_guard)
        .instrument(span)
        .await
    {
        debug!("Connection {connection_id} ended: {e}");
    }
}

/// The caller must present a valid token for a user that still exists and belongs to `tenant_id`
async fn authorize(
    state: &AppState,
    tenant_id: &str,
    query_token: Option<&str>,
    headers: &HeaderMap,
) -> Result<Subscriber, StatusCode> {
    let token = match query_token {
        Some(token) if !token.is_empty() => token,
        _ => {
            let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
            extract_bearer(header).map_err(|e| {
                warn!("WebSocket upgrade without usable token: {}", e);
                state.metrics.connection_rejected("unauthorized");
                StatusCode::UNAUTHORIZED
            })?
        }
    };

    let claims = state.jwt_validator.validate(token).map_err(|e| {
        warn!("JWT validation failed: {}", e);
        state.metrics.connection_rejected("unauthorized");
        StatusCode::UNAUTHORIZED
    })?;

    let context = TenantContext::from_claims(&claims).map_err(|_| StatusCode::UNAUTHORIZED)?;
    if context.tenant_key() != tenant_id {
        warn!(
            "Token for tenant {} presented on tenant {}",
            context.tenant_id, tenant_id
        );
        state.metrics.connection_rejected("forbidden");
        return Err(StatusCode::FORBIDDEN);
    }

    // Membership may have changed since the token was issued
    let user_id = context.user_id;
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            error!("User lookup failed during WebSocket upgrade: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            warn!("WebSocket token for unknown user {}", user_id);
            state.metrics.connection_rejected("unauthorized");
            StatusCode::UNAUTHORIZED
        })?;

    if user.tenant_id.to_string() != tenant_id {
        warn!(
            "User {} (tenant {}) tried to subscribe to tenant {}",
            user.id, user.tenant_id, tenant_id
        );
        state.metrics.connection_rejected("forbidden");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(Subscriber::new(user.id, claims.exp))
}

/// Fast rejection before the upgrade; registration re-checks under the registry lock
async fn check_limits(state: &AppState, tenant_id: &str) -> Result<(), StatusCode> {
    let total = state.broadcaster.connection_count().await;
    if total >= state.limits.max_total {
        warn!(
            "Total connection limit reached: {}/{}",
            total, state.limits.max_total
        );
        state.metrics.connection_rejected("limit_total");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let per_tenant = state.broadcaster.subscriber_count(tenant_id).await;
    if per_tenant >= state.limits.max_per_tenant {
        warn!(
            "Connection limit reached for tenant {}: {}/{}",
            tenant_id, per_tenant, state.limits.max_per_tenant
        );
        state.metrics.connection_rejected("limit_tenant");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(())
}
