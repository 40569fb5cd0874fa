use crate::{
    ConnectionConfig, ConnectionHandle, ConnectionId, ConnectionLimits, EvictionReason, Metrics,
    Result as WsErrorResult, ShutdownGuard, Subscriber, TenantBroadcaster, WsError,
};

use std::ops::ControlFlow;
use std::panic::Location;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, interval_at, sleep_until, timeout};

/// Manages a single WebSocket connection subscribed to one tenant
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    tenant_id: String,
    subscriber: Option<Subscriber>,
    config: ConnectionConfig,
    limits: ConnectionLimits,
    metrics: Metrics,
    broadcaster: TenantBroadcaster,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        tenant_id: String,
        config: ConnectionConfig,
        limits: ConnectionLimits,
        metrics: Metrics,
        broadcaster: TenantBroadcaster,
    ) -> Self {
        Self {
            connection_id,
            tenant_id,
            subscriber: None,
            config,
            limits,
            metrics,
            broadcaster,
        }
    }

    /// Attach the identity established at the handshake
    pub fn with_subscriber(mut self, subscriber: Option<Subscriber>) -> Self {
        self.subscriber = subscriber;
        self
    }

    /// Handle the WebSocket connection lifecycle.
    ///
    /// The connection is registered with the broadcaster for as long as this
    /// runs and is always unregistered on the way out.
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded outbound queue; its sender is what the broadcaster holds
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);
        let handle = ConnectionHandle::with_id(self.connection_id, tx.clone())
            .for_user(self.subscriber.map(|s| s.user_id));
        let evicted = handle.eviction_signal();

        if let Err(e) = self
            .broadcaster
            .connect_bounded(&self.tenant_id, handle, &self.limits)
            .await
        {
            log::warn!(
                "Connection {} refused after upgrade: {}",
                self.connection_id,
                e
            );
            let close = close_message(close_code::AGAIN, "connection limit");
            let _ = timeout(self.config.close_grace, ws_sender.send(close)).await;
            return Err(e);
        }

        log::info!(
            "WebSocket connection {} established for tenant {}",
            self.connection_id,
            self.tenant_id
        );
        self.metrics.connection_established();

        // Close frames bypass the queue so a full queue cannot hold them back
        let (close_tx, mut close_rx) = oneshot::channel::<Message>();
        let mut send_task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    frame = &mut close_rx => {
                        if let Ok(frame) = frame {
                            let _ = ws_sender.send(frame).await;
                        }
                        break;
                    }
                    msg = rx.recv() => {
                        let Some(msg) = msg else { break };
                        if ws_sender.send(msg).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        let interval = self.config.heartbeat_interval;
        let silence_limit = self.config.heartbeat_timeout;
        let mut heartbeat = interval_at(Instant::now() + interval, interval);
        let mut last_seen = Instant::now();

        let expiry = async {
            match self.subscriber.map(|s| s.expires_at()) {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(expiry);

        let (result, close_frame) = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => {
                            last_seen = Instant::now();
                            if self.handle_client_message(msg, &tx).is_break() {
                                break (Ok(()), None);
                            }
                        }
                        Some(Err(e)) => {
                            log::warn!(
                                "WebSocket error on connection {}: {}",
                                self.connection_id,
                                e
                            );
                            break (
                                Err(WsError::ConnectionClosed {
                                    reason: format!("WebSocket error: {}", e),
                                    location: ErrorLocation::from(Location::caller()),
                                }),
                                None,
                            );
                        }
                        None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break (Ok(()), None);
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > silence_limit {
                        log::warn!(
                            "Connection {} silent for {:?}, closing",
                            self.connection_id,
                            silence_limit
                        );
                        break (
                            Err(WsError::HeartbeatTimeout {
                                timeout: silence_limit,
                                location: ErrorLocation::from(Location::caller()),
                            }),
                            Some(close_message(close_code::AWAY, "heartbeat timeout")),
                        );
                    }
                    if tx.try_send(Message::Ping(Bytes::new())).is_err() {
                        log::debug!("Ping skipped for connection {}: queue full", self.connection_id);
                    }
                }

                reason = evicted.wait() => {
                    let location = ErrorLocation::from(Location::caller());
                    break match reason {
                        EvictionReason::SlowClient => (
                            Err(WsError::SendBufferFull { location }),
                            Some(close_message(close_code::AGAIN, "too slow")),
                        ),
                        EvictionReason::Revoked => (
                            Err(WsError::AccessRevoked { location }),
                            Some(close_message(close_code::POLICY, "access revoked")),
                        ),
                    };
                }

                _ = &mut expiry => {
                    log::info!("Token for connection {} expired, closing", self.connection_id);
                    break (
                        Err(WsError::TokenExpired {
                            location: ErrorLocation::from(Location::caller()),
                        }),
                        Some(close_message(close_code::POLICY, "token expired")),
                    );
                }

                _ = &mut send_task => {
                    log::debug!("Writer for connection {} stopped", self.connection_id);
                    break (Ok(()), None);
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    break (
                        Ok(()),
                        Some(close_message(close_code::RESTART, "server shutting down")),
                    );
                }
            }
        };

        // Cleanup
        self.broadcaster
            .disconnect(&self.tenant_id, self.connection_id)
            .await;
        if let Some(frame) = close_frame {
            let _ = close_tx.send(frame);
        } else {
            drop(close_tx);
        }
        drop(tx);

        if !send_task.is_finished()
            && stop_writer(send_task, self.config.close_grace).await == WriterExit::Aborted
        {
            log::debug!(
                "Writer for connection {} still blocked after {:?}, aborted",
                self.connection_id,
                self.config.close_grace
            );
        }

        let reason = match &result {
            Ok(()) => "normal",
            Err(WsError::HeartbeatTimeout { .. }) => "timeout",
            Err(WsError::SendBufferFull { .. }) => "slow_client",
            Err(WsError::AccessRevoked { .. }) => "revoked",
            Err(WsError::TokenExpired { .. }) => "expired",
            Err(_) => "error",
        };
        self.metrics.connection_closed(reason);

        log::info!(
            "WebSocket connection {} closed for tenant {} ({})",
            self.connection_id,
            self.tenant_id,
            reason
        );

        result
    }

    /// Client payloads carry no meaning here; they only prove the peer is alive.
    fn handle_client_message(&self, msg: Message, tx: &mpsc::Sender<Message>) -> ControlFlow<()> {
        match msg {
            Message::Text(text) => {
                log::debug!(
                    "Discarding text from connection {}: {}",
                    self.connection_id,
                    text.as_str()
                );
                self.metrics.message_received("text");
            }
            Message::Binary(data) => {
                log::debug!(
                    "Discarding {} binary bytes from connection {}",
                    data.len(),
                    self.connection_id
                );
                self.metrics.message_received("binary");
            }
            Message::Ping(data) => {
                let _ = tx.try_send(Message::Pong(data));
            }
            Message::Pong(_) => {}
            Message::Close(_) => {
                log::info!("Received close frame from connection {}", self.connection_id);
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}

/// How the writer task ended during cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriterExit {
    Drained,
    Aborted,
}

/// Give the writer `grace` to flush, then abort it.
///
/// A peer that stopped reading can block the writer on a full socket forever.
pub(crate) async fn stop_writer(mut writer: JoinHandle<()>, grace: Duration) -> WriterExit {
    match timeout(grace, &mut writer).await {
        Ok(_) => WriterExit::Drained,
        Err(_) => {
            writer.abort();
            WriterExit::Aborted
        }
    }
}

fn close_message(code: u16, reason: &'static str) -> Message {
    Message::Close(Some(CloseFrame {
        code,
        reason: reason.into(),
    }))
}
