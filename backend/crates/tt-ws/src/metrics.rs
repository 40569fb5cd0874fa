use metrics::{counter, gauge};

/// Metrics collector for WebSocket operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "tt_ws" }
    }

    /// Record new connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record a handshake refused before upgrade
    pub fn connection_rejected(&self, reason: &str) {
        counter!(format!("{}.connections.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record message received from client (discarded)
    pub fn message_received(&self, kind: &str) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
        counter!(format!("{}.messages.received.{}", self.prefix, kind)).increment(1);
    }

    /// Record a frame queued for one subscriber
    pub fn message_sent(&self, message_type: &str) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
        counter!(format!("{}.messages.sent.{}", self.prefix, message_type)).increment(1);
    }

    /// Record broadcast fan-out
    pub fn broadcast_published(&self, message_type: &str, delivered: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.published.{}", self.prefix, message_type)).increment(1);
        gauge!(format!("{}.broadcast.last_fanout", self.prefix)).set(delivered as f64);
    }

    /// Record a subscriber dropped because its queue rejected a frame
    pub fn send_failed(&self, reason: &str) {
        counter!(format!("{}.broadcast.send_failed", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.send_failed.{}", self.prefix, reason)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }

    pub fn tenants_active(&self, count: usize) {
        gauge!(format!("{}.tenants.active", self.prefix)).set(count as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
