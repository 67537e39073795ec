//! Client for mycology-focused research sessions.
//!
//! [`ResearchClient`] drives a streaming research session and the
//! backend's file store. The [`query`] module enriches plain questions
//! with domain vocabulary and needs no network at all.

pub mod error;
pub mod events;
pub mod protocol;
pub mod query;
pub mod request;
pub mod session;
pub mod transfer;

pub use error::SessionError;
pub use events::{EventBus, EventKind, ResearchEvent};
pub use protocol::{Command, UnknownWireFormat, WireFormat};
pub use query::{
    enhance_query, enhance_query_default, suggest_related_queries, Category, UnknownCategory,
};
pub use request::{ReportSource, ResearchParams, ResearchRequest};
pub use session::{ClientConfig, ResearchClient, SessionState};
pub use transfer::{FileListing, TransferClient};
