use crate::{
    BroadcastMessage, ConnectionHandle, ConnectionId, ConnectionLimits, EvictionReason, Metrics,
    Result as WsErrorResult, TenantEvent, WsError,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::Message;
use error_location::ErrorLocation;
use tokio::sync::{Mutex, mpsc::error::TrySendError};
use tokio::task::JoinHandle;

/// Live connections grouped by tenant.
///
/// Every read-modify-write runs under one async mutex. A tenant key is
/// present only while it has at least one connection, and a handle is
/// filed under exactly one tenant.
pub struct TenantBroadcaster {
    inner: Arc<Mutex<BroadcasterInner>>,
    metrics: Metrics,
}

struct BroadcasterInner {
    /// Insertion order is broadcast order
    tenants: HashMap<String, Vec<ConnectionHandle>>,
}

impl TenantBroadcaster {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BroadcasterInner {
                tenants: HashMap::new(),
            })),
            metrics,
        }
    }

    /// Register a connection under a tenant. It receives broadcasts as soon as this returns.
    pub async fn connect(&self, tenant_id: &str, handle: ConnectionHandle) {
        let mut inner = self.inner.lock().await;

        let connections = inner.tenants.entry(tenant_id.to_string()).or_default();
        connections.push(handle);
        let count = connections.len();
        let tenants = inner.tenants.len();

        log::debug!(
            "Connection registered for tenant {} ({} total for tenant)",
            tenant_id,
            count
        );
        self.metrics.tenants_active(tenants);
    }

    /// Register a connection unless that would exceed `limits`.
    ///
    /// The check and the insert share one critical section, so concurrent
    /// handshakes cannot overshoot either limit.
    pub async fn connect_bounded(
        &self,
        tenant_id: &str,
        handle: ConnectionHandle,
        limits: &ConnectionLimits,
    ) -> WsErrorResult<()> {
        let location = ErrorLocation::from(Location::caller());
        let mut inner = self.inner.lock().await;

        let total: usize = inner.tenants.values().map(Vec::len).sum();
        if total >= limits.max_total {
            self.metrics.connection_rejected("limit_total");
            return Err(WsError::ConnectionLimitExceeded {
                current: total,
                max: limits.max_total,
                location,
            });
        }

        let per_tenant = inner.tenants.get(tenant_id).map(Vec::len).unwrap_or(0);
        if per_tenant >= limits.max_per_tenant {
            self.metrics.connection_rejected("limit_tenant");
            return Err(WsError::ConnectionLimitExceeded {
                current: per_tenant,
                max: limits.max_per_tenant,
                location,
            });
        }

        inner
            .tenants
            .entry(tenant_id.to_string())
            .or_default()
            .push(handle);

        log::debug!(
            "Connection registered for tenant {} ({} total for tenant)",
            tenant_id,
            per_tenant + 1
        );
        self.metrics.tenants_active(inner.tenants.len());
        Ok(())
    }

    /// Remove a connection if present. Idempotent.
    pub async fn disconnect(&self, tenant_id: &str, connection_id: ConnectionId) {
        let mut inner = self.inner.lock().await;

        let Some(connections) = inner.tenants.get_mut(tenant_id) else {
            return;
        };

        let before = connections.len();
        connections.retain(|handle| handle.id() != connection_id);
        let remaining = connections.len();

        if remaining < before {
            log::debug!(
                "Connection {} removed from tenant {} ({} remaining)",
                connection_id,
                tenant_id,
                remaining
            );
        }

        if remaining == 0 {
            inner.tenants.remove(tenant_id);
            log::info!("Removed empty connection list for tenant {}", tenant_id);
        }
        self.metrics.tenants_active(inner.tenants.len());
    }

    /// Drop every connection `user_id` holds on `tenant_id` and tell each to close.
    ///
    /// Returns how many were removed. Handshakes made without a token carry no
    /// user and are never matched.
    pub async fn disconnect_user(&self, tenant_id: &str, user_id: i64) -> usize {
        let mut inner = self.inner.lock().await;

        let Some(connections) = inner.tenants.get_mut(tenant_id) else {
            return 0;
        };

        let before = connections.len();
        connections.retain(|handle| {
            if handle.user_id() == Some(user_id) {
                handle.evict(EvictionReason::Revoked);
                false
            } else {
                true
            }
        });
        let removed = before - connections.len();

        if connections.is_empty() {
            inner.tenants.remove(tenant_id);
        }
        self.metrics.tenants_active(inner.tenants.len());

        if removed > 0 {
            log::info!(
                "Revoked {} connection(s) of user {} on tenant {}",
                removed,
                user_id,
                tenant_id
            );
        }
        removed
    }

    /// Queue `message` on every connection of `tenant_id`, in registration order.
    ///
    /// Returns how many connections accepted the frame. Connections whose queue
    /// is full or closed are dropped from the registry in the same pass and
    /// signalled to close; nothing is surfaced to the caller.
    pub async fn broadcast(&self, tenant_id: &str, message: &BroadcastMessage) -> usize {
        let mut inner = self.inner.lock().await;

        let Some(connections) = inner.tenants.get_mut(tenant_id) else {
            log::debug!("No connections for tenant {}, dropping {}", tenant_id, message.message_type);
            return 0;
        };

        let mut delivered = 0;
        connections.retain(|handle| {
            match handle.try_send(Message::Text(message.payload.clone())) {
                Ok(()) => {
                    delivered += 1;
                    self.metrics.message_sent(&message.message_type);
                    true
                }
                Err(TrySendError::Full(_)) => {
                    log::warn!(
                        "Connection {} on tenant {} is too slow, dropping it",
                        handle.id(),
                        tenant_id
                    );
                    self.metrics.send_failed("full");
                    handle.evict(EvictionReason::SlowClient);
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    log::debug!(
                        "Connection {} on tenant {} already closed, dropping it",
                        handle.id(),
                        tenant_id
                    );
                    self.metrics.send_failed("closed");
                    handle.evict(EvictionReason::SlowClient);
                    false
                }
            }
        });

        if connections.is_empty() {
            inner.tenants.remove(tenant_id);
            self.metrics.tenants_active(inner.tenants.len());
        }

        log::debug!(
            "Broadcast {} to tenant {} ({} receivers)",
            message.message_type,
            tenant_id,
            delivered
        );
        self.metrics
            .broadcast_published(&message.message_type, delivered);

        delivered
    }

    /// Fire-and-forget: serialize `event` and fan it out on a detached task.
    ///
    /// Callers normally drop the returned handle; awaiting it yields the
    /// number of connections that accepted the frame.
    pub fn publish(&self, tenant_id: impl Into<String>, event: TenantEvent) -> JoinHandle<usize> {
        let broadcaster = self.clone();
        let tenant_id = tenant_id.into();

        tokio::spawn(async move {
            match BroadcastMessage::from_event(&event) {
                Ok(message) => broadcaster.broadcast(&tenant_id, &message).await,
                Err(e) => {
                    log::error!("Failed to encode {} event: {}", event.event_type(), e);
                    broadcaster.metrics.error_occurred("encode");
                    0
                }
            }
        })
    }

    /// Get connection count for a tenant
    pub async fn subscriber_count(&self, tenant_id: &str) -> usize {
        let inner = self.inner.lock().await;
        inner.tenants.get(tenant_id).map(Vec::len).unwrap_or(0)
    }

    /// Connection ids of a tenant, in broadcast order
    pub async fn connection_ids(&self, tenant_id: &str) -> Vec<ConnectionId> {
        let inner = self.inner.lock().await;
        inner
            .tenants
            .get(tenant_id)
            .map(|connections| connections.iter().map(ConnectionHandle::id).collect())
            .unwrap_or_default()
    }

    /// Get all tenants with at least one connection
    pub async fn active_tenants(&self) -> Vec<String> {
        let inner = self.inner.lock().await;
        inner.tenants.keys().cloned().collect()
    }

    /// Total connections across all tenants
    pub async fn connection_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.tenants.values().map(Vec::len).sum()
    }

    /// Whether any tenant is mapped to an empty list (should never happen)
    pub async fn has_empty_entries(&self) -> bool {
        let inner = self.inner.lock().await;
        inner.tenants.values().any(Vec::is_empty)
    }
}

impl Default for TenantBroadcaster {
    fn default() -> Self {
        Self::new(Metrics::default())
    }
}

impl Clone for TenantBroadcaster {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            metrics: self.metrics.clone(),
        }
    }
}
