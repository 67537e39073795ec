//! Streaming session configuration types.

use serde::{Deserialize, Serialize};

/// Streaming session tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds between keep-alive probes.
    pub keepalive_interval: u32,
    /// Seconds to wait for the WebSocket handshake.
    pub connect_timeout: u32,
    /// Outbound command encoding: "envelope" or "prefixed".
    pub wire_format: String,
    /// Buffered events per subscriber before lagging.
    pub event_capacity: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keepalive_interval: 30,
            connect_timeout: 15,
            wire_format: "envelope".into(),
            event_capacity: 256,
        }
    }
}
