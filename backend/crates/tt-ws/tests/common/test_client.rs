use std::time::Duration;

use axum_test::{TestServer, TestWebSocket, WsMessage};

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
    pub tenant_id: String,
}

impl WsTestClient {
    /// Connect with the token in the query string (what browsers do)
    pub async fn connect(server: &TestServer, tenant_id: &str, token: &str) -> Self {
        let ws = server
            .get_websocket(&format!("/ws/{}", tenant_id))
            .add_query_param("token", token)
            .await
            .into_websocket()
            .await;

        Self {
            ws,
            tenant_id: tenant_id.to_string(),
        }
    }

    /// Connect with an `Authorization: Bearer` header
    pub async fn connect_with_header(server: &TestServer, tenant_id: &str, token: &str) -> Self {
        let ws = server
            .get_websocket(&format!("/ws/{}", tenant_id))
            .add_header("Authorization", format!("Bearer {}", token))
            .await
            .into_websocket()
            .await;

        Self {
            ws,
            tenant_id: tenant_id.to_string(),
        }
    }

    /// Connect without any credentials
    pub async fn connect_anonymous(server: &TestServer, tenant_id: &str) -> Self {
        let ws = server
            .get_websocket(&format!("/ws/{}", tenant_id))
            .await
            .into_websocket()
            .await;

        Self {
            ws,
            tenant_id: tenant_id.to_string(),
        }
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    pub async fn receive_text(&mut self) -> String {
        self.ws.receive_text().await
    }

    pub async fn receive_json(&mut self) -> serde_json::Value {
        serde_json::from_str(&self.receive_text().await).expect("frame should be JSON")
    }

    /// Code of the next close frame, skipping data and heartbeat frames
    pub async fn receive_close_code(&mut self, within: Duration) -> Option<u16> {
        tokio::time::timeout(within, async {
            loop {
                match self.ws.receive_message().await {
                    WsMessage::Close(frame) => return frame.map(|f| u16::from(f.code)),
                    _ => continue,
                }
            }
        })
        .await
        .expect("no close frame received")
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}
