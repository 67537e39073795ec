//! Typed events published by a research session.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// The six kinds of event a session can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Logs,
    Progress,
    ReportComplete,
    ResearchComplete,
    Error,
    LanggraphUpdate,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Logs => "logs",
            EventKind::Progress => "progress",
            EventKind::ReportComplete => "report_complete",
            EventKind::ResearchComplete => "research_complete",
            EventKind::Error => "error",
            EventKind::LanggraphUpdate => "langgraph_update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResearchEvent {
    /// Backend log line.
    Logs {
        content: Option<String>,
        output: serde_json::Value,
    },
    /// Research progress update.
    Progress {
        content: Option<String>,
        output: serde_json::Value,
    },
    /// The report is available; `output` is usually its path.
    ReportComplete { output: serde_json::Value },
    /// The backend finished the session after delivering a report.
    ResearchComplete,
    /// Connection or transfer failure.
    Error { message: String },
    /// Agent-graph state for visualisers.
    LanggraphUpdate { content: serde_json::Value },
}

impl ResearchEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ResearchEvent::Logs { .. } => EventKind::Logs,
            ResearchEvent::Progress { .. } => EventKind::Progress,
            ResearchEvent::ReportComplete { .. } => EventKind::ReportComplete,
            ResearchEvent::ResearchComplete => EventKind::ResearchComplete,
            ResearchEvent::Error { .. } => EventKind::Error,
            ResearchEvent::LanggraphUpdate { .. } => EventKind::LanggraphUpdate,
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        ResearchEvent::Error {
            message: message.into(),
        }
    }
}

/// Fan-out of session events to any number of listeners.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ResearchEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResearchEvent> {
        self.sender.subscribe()
    }

    /// Publish to every current subscriber. Returns how many received it.
    pub fn publish(&self, event: ResearchEvent) -> usize {
        let kind = event.kind();
        let delivered = self.sender.send(event).unwrap_or(0);
        if delivered == 0 {
            trace!(kind = kind.as_str(), "event dropped, no subscribers");
        }
        delivered
    }
}
