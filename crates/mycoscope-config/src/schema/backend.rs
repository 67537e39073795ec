use serde::{Deserialize, Serialize};

/// Where the research backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// HTTP base address; the WebSocket endpoint is derived from it.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
        }
    }
}
