//! Public handle for a research session.

use std::path::Path;
use std::sync::Arc;

use mycoscope_common::SessionId;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::events::{EventBus, ResearchEvent};
use crate::protocol::Command;
use crate::request::{ResearchParams, ResearchRequest};
use crate::transfer::{FileListing, TransferClient};

use super::connection::{connection_task, ConnectionContext};
use super::keepalive::KeepAlive;
use super::state::{SessionState, StateCell};
use super::types::{ClientConfig, Outbound};

const COMMAND_QUEUE: usize = 64;

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The live half of an open connection.
struct Connection {
    command_tx: mpsc::Sender<Outbound>,
    _task: JoinHandle<()>,
}

/// Handle for one research session against a GPT-Researcher style backend.
///
/// Events are delivered through [`ResearchClient::subscribe`]. The client
/// owns at most one WebSocket connection and one keep-alive task; both are
/// released by [`ResearchClient::disconnect`] or when the client is dropped.
pub struct ResearchClient {
    config: ClientConfig,
    session_id: SessionId,
    state: Arc<StateCell>,
    bus: EventBus,
    connection: Option<Connection>,
    keepalive: Option<KeepAlive>,
    transfer: TransferClient,
}

impl ResearchClient {
    pub fn new(config: ClientConfig) -> Result<Self, SessionError> {
        if config.keepalive_interval.is_zero() {
            return Err(SessionError::InvalidRequest(
                "keepalive_interval must be non-zero".into(),
            ));
        }
        let transfer = TransferClient::new(&config.base_url, config.transfer_timeout)?;
        let session_id = SessionId::new();
        debug!(session = %session_id, base_url = %config.base_url, "research client created");
        Ok(Self {
            bus: EventBus::new(config.event_capacity.max(1)),
            config,
            session_id,
            state: Arc::new(StateCell::new()),
            connection: None,
            keepalive: None,
            transfer,
        })
    }

    // -- connection ---------------------------------------------------------

    /// Open the streaming connection. Returns immediately if already open.
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        match self.state.get() {
            SessionState::Open => return Ok(()),
            // A previous connect future was dropped mid-handshake.
            SessionState::Connecting => {
                let _ = self.state.transition(SessionState::Closed);
            }
            SessionState::Disconnected | SessionState::Closed => {}
        }
        self.keepalive = None;
        self.connection = None;

        let epoch = self.state.next_epoch();
        self.state.transition(SessionState::Connecting)?;

        let url = self.config.ws_url();
        info!(session = %self.session_id, url = %url, "connecting");

        let handshake = tokio::time::timeout(
            self.config.connect_timeout,
            tokio_tungstenite::connect_async(url.as_str()),
        )
        .await;

        let ws = match handshake {
            Ok(Ok((ws, _response))) => ws,
            Ok(Err(e)) => return Err(self.connect_failed(epoch, format!("{url}: {e}"))),
            Err(_) => {
                return Err(self.connect_failed(
                    epoch,
                    format!("{url}: timed out after {:?}", self.config.connect_timeout),
                ))
            }
        };

        if !self.state.transition_for(epoch, SessionState::Open) {
            return Err(SessionError::Connection(format!(
                "{url}: connection superseded during handshake"
            )));
        }

        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
        let ctx = ConnectionContext {
            session: self.session_id.clone(),
            epoch,
            state: Arc::clone(&self.state),
            bus: self.bus.clone(),
            wire_format: self.config.wire_format,
        };
        let task = tokio::spawn(connection_task(ws, command_rx, ctx));
        self.connection = Some(Connection {
            command_tx,
            _task: task,
        });

        info!(session = %self.session_id, "connected");
        Ok(())
    }

    fn connect_failed(&self, epoch: u64, message: String) -> SessionError {
        warn!(session = %self.session_id, error = %message, "connection failed");
        self.state.transition_for(epoch, SessionState::Closed);
        self.bus.publish(ResearchEvent::error(message.clone()));
        SessionError::Connection(message)
    }

    /// Close the connection and stop the keep-alive. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        self.keepalive = None;
        if let Some(connection) = self.connection.take() {
            let _ = connection.command_tx.try_send(Outbound::Close);
            info!(session = %self.session_id, "disconnecting");
        }
        self.state.next_epoch();
        if matches!(
            self.state.get(),
            SessionState::Open | SessionState::Connecting
        ) {
            let _ = self.state.transition(SessionState::Closed);
        }
    }

    // -- commands -----------------------------------------------------------

    /// Send a start command, connecting first if needed, and arm the keep-alive.
    ///
    /// Returns once the command is queued; results arrive as events.
    pub async fn start_research(&mut self, params: ResearchParams) -> Result<(), SessionError> {
        let request = ResearchRequest::from_params(params)?;

        if self.state.get() != SessionState::Open || self.connection.is_none() {
            self.connect().await?;
        }

        info!(session = %self.session_id, task = %request.task, "starting research");
        self.send(Command::Start(request))?;

        if !self.has_keepalive() {
            if let Some(connection) = &self.connection {
                self.keepalive = Some(KeepAlive::start(
                    connection.command_tx.clone(),
                    self.config.keepalive_interval,
                ));
                debug!(
                    session = %self.session_id,
                    interval = ?self.config.keepalive_interval,
                    "keep-alive armed"
                );
            }
        }
        Ok(())
    }

    /// Send a follow-up chat message. Returns `false` unless the session is open.
    pub fn send_chat_message(&self, message: &str) -> bool {
        match self.send(Command::Chat {
            message: message.to_string(),
        }) {
            Ok(()) => true,
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "chat message not sent");
                false
            }
        }
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        let state = self.state.get();
        let connection = match &self.connection {
            Some(connection) if state == SessionState::Open => connection,
            _ => return Err(SessionError::NotOpen(state)),
        };
        match connection.command_tx.try_send(Outbound::Send(command)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                Err(SessionError::Connection("outbound queue full".to_string()))
            }
            Err(TrySendError::Closed(_)) => Err(SessionError::NotOpen(self.state.get())),
        }
    }

    // -- file transfer ------------------------------------------------------

    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<serde_json::Value, SessionError> {
        let result = self.transfer.upload_file(path.as_ref()).await;
        self.report(result)
    }

    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<serde_json::Value, SessionError> {
        let result = self.transfer.upload_bytes(filename, bytes).await;
        self.report(result)
    }

    pub async fn get_uploaded_files(&self) -> Result<FileListing, SessionError> {
        let result = self.transfer.list_files().await;
        self.report(result)
    }

    pub async fn delete_file(&self, filename: &str) -> Result<serde_json::Value, SessionError> {
        let result = self.transfer.delete_file(filename).await;
        self.report(result)
    }

    /// Mirror a transfer failure onto the event stream.
    fn report<T>(&self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        if let Err(e) = &result {
            warn!(session = %self.session_id, error = %e, "file transfer failed");
            self.bus.publish(ResearchEvent::error(e.to_string()));
        }
        result
    }

    // -- accessors ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a connection handle is held and its task is still accepting commands.
    pub fn has_connection(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|c| !c.command_tx.is_closed())
    }

    /// Whether a keep-alive is running for an open connection.
    pub fn has_keepalive(&self) -> bool {
        self.state.get() == SessionState::Open
            && self.keepalive.as_ref().is_some_and(KeepAlive::is_running)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResearchEvent> {
        self.bus.subscribe()
    }

    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Drop for ResearchClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for ResearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchClient")
            .field("session_id", &self.session_id)
            .field("state", &self.state.get())
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
