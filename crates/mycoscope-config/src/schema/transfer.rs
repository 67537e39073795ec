use serde::{Deserialize, Serialize};

/// File-transfer (HTTP) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Request timeout in seconds.
    pub timeout: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self { timeout: 300 }
    }
}
