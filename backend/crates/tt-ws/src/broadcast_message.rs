use crate::{Result as WsErrorResult, TenantEvent, WsError};

use std::panic::Location;

use axum::extract::ws::Utf8Bytes;
use error_location::ErrorLocation;

/// A broadcast message that will be sent to clients
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// Serialized JSON text (ready to send on wire)
    pub payload: Utf8Bytes,
    /// Message type for metrics/logging
    pub message_type: String,
}

impl BroadcastMessage {
    pub fn new(payload: impl Into<Utf8Bytes>, message_type: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            message_type: message_type.into(),
        }
    }

    /// Serialize an event once; the resulting payload is shared by every recipient
    #[track_caller]
    pub fn from_event(event: &TenantEvent) -> WsErrorResult<Self> {
        let json = serde_json::to_string(event).map_err(|e| WsError::Serialization {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self::new(json, event.event_type()))
    }
}
