//! Wire protocol for the research WebSocket.
//!
//! Outbound commands are a typed enum. Two encodings are supported: a
//! tagged JSON envelope, and the prefixed form (`start{...}`, `chat{...}`,
//! `ping`) spoken by existing GPT-Researcher backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::request::ResearchRequest;

/// Inbound frame types understood by the dispatcher.
pub mod frame_types {
    pub const LOGS: &str = "logs";
    pub const RESEARCH_PROGRESS: &str = "research_progress";
    pub const PATH: &str = "path";
    pub const LANGGRAPH_UPDATE: &str = "langgraph_update";
    pub const PONG: &str = "pong";
}

/// A command sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum Command {
    Start(ResearchRequest),
    Chat { message: String },
    Ping,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::Chat { .. } => "chat",
            Command::Ping => "ping",
        }
    }
}

/// How commands are laid out on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireFormat {
    /// `{"command": "...", "payload": {...}}`
    #[default]
    Envelope,
    /// Command name immediately followed by the JSON body.
    Prefixed,
}

impl WireFormat {
    pub fn encode(self, command: &Command) -> Result<String, serde_json::Error> {
        match self {
            WireFormat::Envelope => serde_json::to_string(command),
            WireFormat::Prefixed => match command {
                Command::Start(request) => Ok(format!("start{}", serde_json::to_string(request)?)),
                Command::Chat { message } => Ok(format!(
                    "chat{}",
                    serde_json::to_string(&serde_json::json!({ "message": message }))?
                )),
                Command::Ping => Ok("ping".to_string()),
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WireFormat::Envelope => "envelope",
            WireFormat::Prefixed => "prefixed",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wire format: {0}")]
pub struct UnknownWireFormat(pub String);

impl FromStr for WireFormat {
    type Err = UnknownWireFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "envelope" => Ok(WireFormat::Envelope),
            "prefixed" => Ok(WireFormat::Prefixed),
            other => Err(UnknownWireFormat(other.to_string())),
        }
    }
}

/// Loosely-typed inbound frame. Which fields matter depends on `kind`.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
}

impl InboundFrame {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// `content` as text; non-string content is rendered as JSON.
    pub fn content_text(&self) -> Option<String> {
        match &self.content {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}
