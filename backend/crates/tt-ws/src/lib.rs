pub mod app_state;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_handle;
pub mod connection_id;
pub mod connection_limits;
pub mod error;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod subscriber;
pub mod tenant_broadcaster;
pub mod tenant_event;
pub mod web_socket_connection;

pub use app_state::{AppState, WsParams, handler};
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_handle::{ConnectionHandle, EvictionReason, EvictionSignal};
pub use connection_id::ConnectionId;
pub use connection_limits::ConnectionLimits;
pub use error::{Result, WsError};
pub use metrics::Metrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use subscriber::Subscriber;
pub use tenant_broadcaster::TenantBroadcaster;
pub use tenant_event::{DeletedPayload, MemberPayload, TaskPayload, TenantEvent};
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one WebSocket connection.
/// All log entries within the connection loop will include these fields.
pub fn create_connection_span(tenant_id: &str, connection_id: ConnectionId) -> tracing::Span {
    info_span!(
        "ws_connection",
        tenant_id = %tenant_id,
        connection_id = %connection_id,
    )
}
