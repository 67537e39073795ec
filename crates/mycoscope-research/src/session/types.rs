//! Client configuration and the internal command enum.

use std::time::Duration;

use crate::protocol::{Command, WireFormat};

/// Fixed path of the streaming endpoint under the base address.
const WS_PATH: &str = "/ws";

/// Configuration for a research client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP base address of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Interval between keep-alive probes.
    pub keepalive_interval: Duration,
    /// Handshake timeout for the WebSocket.
    pub connect_timeout: Duration,
    /// Request timeout for file transfers.
    pub transfer_timeout: Duration,
    pub wire_format: WireFormat,
    /// Per-subscriber event buffer.
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            keepalive_interval: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            transfer_timeout: Duration::from_secs(300),
            wire_format: WireFormat::Envelope,
            event_capacity: 256,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// WebSocket URL: `http` maps to `ws`, `https` to `wss`, then `/ws`.
    pub fn ws_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let host = if let Some(rest) = trimmed.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            format!("ws://{rest}")
        } else if trimmed.starts_with("ws://") || trimmed.starts_with("wss://") {
            trimmed.to_string()
        } else {
            format!("ws://{trimmed}")
        };
        format!("{host}{WS_PATH}")
    }
}

/// Instructions for the connection task.
#[derive(Debug)]
pub(crate) enum Outbound {
    Send(Command),
    Close,
}
