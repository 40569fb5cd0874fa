use tt_config::WebSocketConfig;

use std::time::Duration;

const DEFAULT_CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Configuration for WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue size per connection (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Time between server pings
    pub heartbeat_interval: Duration,
    /// Close the connection after this long without hearing from the client
    pub heartbeat_timeout: Duration,
    /// How long the writer may keep flushing after the loop ends before it is aborted
    pub close_grace: Duration,
    /// Require a bearer token whose user belongs to the requested tenant
    pub require_token: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            heartbeat_interval: Duration::from_secs(30),
            heartbeat_timeout: Duration::from_secs(60),
            close_grace: DEFAULT_CLOSE_GRACE,
            require_token: true,
        }
    }
}

impl From<&WebSocketConfig> for ConnectionConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval: Duration::from_secs(config.heartbeat_interval_secs),
            heartbeat_timeout: Duration::from_secs(config.heartbeat_timeout_secs),
            close_grace: DEFAULT_CLOSE_GRACE,
            require_token: config.require_token,
        }
    }
}
