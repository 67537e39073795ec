//! Background task owning one WebSocket connection.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use mycoscope_common::SessionId;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::events::{EventBus, EventKind, ResearchEvent};
use crate::protocol::WireFormat;

use super::handler::handle_frame;
use super::state::{SessionState, StateCell};
use super::types::Outbound;

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Everything the connection task needs besides the socket itself.
pub(crate) struct ConnectionContext {
    pub(crate) session: SessionId,
    pub(crate) epoch: u64,
    pub(crate) state: Arc<StateCell>,
    pub(crate) bus: EventBus,
    pub(crate) wire_format: WireFormat,
}

impl ConnectionContext {
    fn is_current(&self) -> bool {
        self.state.epoch() == self.epoch
    }

    /// Report a transport failure and close, unless this connection was retired.
    fn fail(&self, message: String) {
        if self.is_current() {
            self.bus.publish(ResearchEvent::error(message));
            self.state.transition_for(self.epoch, SessionState::Closed);
        }
    }
}

/// Forward outbound commands and dispatch inbound frames until either side closes.
pub(crate) async fn connection_task(
    ws: WsStream,
    mut command_rx: mpsc::Receiver<Outbound>,
    ctx: ConnectionContext,
) {
    let (mut sink, mut stream) = ws.split();
    let mut report_delivered = false;

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                match command {
                    Some(Outbound::Send(command)) => {
                        let text = match ctx.wire_format.encode(&command) {
                            Ok(text) => text,
                            Err(e) => {
                                warn!(session = %ctx.session, error = %e, "failed to encode command");
                                continue;
                            }
                        };
                        debug!(session = %ctx.session, command = command.name(), "sending command");
                        if let Err(e) = sink.send(WsMessage::Text(text.into())).await {
                            ctx.fail(format!("send failed: {e}"));
                            break;
                        }
                    }
                    Some(Outbound::Close) | None => {
                        let _ = sink.send(WsMessage::Close(None)).await;
                        let _ = sink.close().await;
                        info!(session = %ctx.session, "connection closed by client");
                        break;
                    }
                }
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        if handle_frame(text.as_str(), &ctx.bus) == Some(EventKind::ReportComplete) {
                            report_delivered = true;
                        }
                    }
                    Some(Ok(WsMessage::Ping(data))) => {
                        let _ = sink.send(WsMessage::Pong(data)).await;
                    }
                    Some(Ok(WsMessage::Close(_))) => {
                        info!(session = %ctx.session, "connection closed by server");
                        // Flush the queued close reply to finish the handshake.
                        let _ = sink.close().await;
                        if ctx.is_current() {
                            if report_delivered {
                                ctx.bus.publish(ResearchEvent::ResearchComplete);
                            }
                            ctx.state.transition_for(ctx.epoch, SessionState::Closed);
                        }
                        break;
                    }
                    None => {
                        warn!(session = %ctx.session, "stream ended without close frame");
                        ctx.fail("connection lost: stream ended without close frame".into());
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(session = %ctx.session, error = %e, "WebSocket error");
                        ctx.fail(format!("connection lost: {e}"));
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}
