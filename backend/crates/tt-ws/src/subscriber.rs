use std::time::Duration;

use tokio::time::Instant;

/// Identity proven at the WebSocket handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscriber {
    pub user_id: i64,
    /// Token expiry, Unix seconds
    pub expires_at_unix: i64,
}

impl Subscriber {
    pub fn new(user_id: i64, expires_at_unix: i64) -> Self {
        Self {
            user_id,
            expires_at_unix,
        }
    }

    /// Deadline on the runtime clock; already-expired tokens map to now
    pub fn expires_at(&self) -> Instant {
        let remaining = self.expires_at_unix - chrono::Utc::now().timestamp();
        Instant::now() + Duration::from_secs(remaining.max(0) as u64)
    }
}
