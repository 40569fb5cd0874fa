use crate::ConnectionId;

use std::sync::{Arc, OnceLock};

use axum::extract::ws::Message;
use tokio::sync::{Notify, mpsc};

/// Why the registry dropped a connection it had not been asked to disconnect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// The outbound queue was full or already closed
    SlowClient,
    /// The user behind the connection no longer belongs to the tenant
    Revoked,
}

#[derive(Debug, Default)]
struct Eviction {
    notify: Notify,
    reason: OnceLock<EvictionReason>,
}

/// Connection side of an eviction; resolves once the registry drops the handle.
#[derive(Debug, Clone)]
pub struct EvictionSignal(Arc<Eviction>);

impl EvictionSignal {
    /// Wait for eviction. The first recorded reason wins.
    pub async fn wait(&self) -> EvictionReason {
        self.0.notify.notified().await;
        self.reason().unwrap_or(EvictionReason::SlowClient)
    }

    pub fn reason(&self) -> Option<EvictionReason> {
        self.0.reason.get().copied()
    }
}

/// The registry's view of one open WebSocket: the sending half of the
/// connection's bounded outbound queue, tagged with the authenticated user.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    user_id: Option<i64>,
    sender: mpsc::Sender<Message>,
    eviction: Arc<Eviction>,
}

impl ConnectionHandle {
    pub fn new(sender: mpsc::Sender<Message>) -> Self {
        Self::with_id(ConnectionId::new(), sender)
    }

    pub fn with_id(id: ConnectionId, sender: mpsc::Sender<Message>) -> Self {
        Self {
            id,
            user_id: None,
            sender,
            eviction: Arc::default(),
        }
    }

    /// Tag the handle with the user it was authorized for
    pub fn for_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// `None` when the handshake ran without a token
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    /// Queue a frame without waiting. Fails when the queue is full or the writer is gone.
    pub fn try_send(
        &self,
        message: Message,
    ) -> Result<(), mpsc::error::TrySendError<Message>> {
        self.sender.try_send(message)
    }

    pub fn eviction_signal(&self) -> EvictionSignal {
        EvictionSignal(Arc::clone(&self.eviction))
    }

    pub(crate) fn evict(&self, reason: EvictionReason) {
        let _ = self.eviction.reason.set(reason);
        self.eviction.notify.notify_one();
    }
}
