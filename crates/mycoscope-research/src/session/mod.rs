//! WebSocket research session client.
//!
//! One client owns at most one streaming connection to the backend's
//! `/ws` endpoint, a keep-alive task while research is running, and an
//! HTTP channel for file management. Inbound frames are published as
//! typed [`ResearchEvent`](crate::events::ResearchEvent)s.

mod client;
mod connection;
mod handler;
mod keepalive;
mod state;
mod types;


pub use client::ResearchClient;
pub use state::SessionState;
pub use types::ClientConfig;
