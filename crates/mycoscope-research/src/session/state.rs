//! Explicit connection state machine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::error::SessionError;

/// Connection state of a research session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closed,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Open => "open",
            SessionState::Closed => "closed",
        }
    }

    /// Whether `self -> next` is a legal edge.
    ///
    /// Leaving `Open` always goes through `Closed`; a fresh connect may
    /// start from `Disconnected` or `Closed`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Disconnected, Connecting)
                | (Closed, Connecting)
                | (Connecting, Open)
                | (Connecting, Closed)
                | (Open, Closed)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared state cell.
///
/// Every connection attempt gets a new epoch. Transitions requested on
/// behalf of an older epoch are ignored, so a retired connection task
/// cannot close a newer connection.
#[derive(Debug)]
pub(crate) struct StateCell {
    tx: watch::Sender<SessionState>,
    epoch: AtomicU64,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::Disconnected);
        Self {
            tx,
            epoch: AtomicU64::new(0),
        }
    }

    pub(crate) fn get(&self) -> SessionState {
        *self.tx.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Retire the current connection and start a new epoch.
    pub(crate) fn next_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Guarded transition for the current epoch.
    pub(crate) fn transition(&self, next: SessionState) -> Result<(), SessionError> {
        let mut result = Ok(());
        self.tx.send_if_modified(|state| {
            if state.can_transition_to(next) {
                debug!(from = %state, to = %next, "session state");
                *state = next;
                true
            } else {
                result = Err(SessionError::InvalidTransition {
                    from: *state,
                    to: next,
                });
                false
            }
        });
        result
    }

    /// Transition only if `epoch` is still current. Returns whether it applied.
    pub(crate) fn transition_for(&self, epoch: u64, next: SessionState) -> bool {
        if self.epoch() != epoch {
            return false;
        }
        self.transition(next).is_ok()
    }
}
