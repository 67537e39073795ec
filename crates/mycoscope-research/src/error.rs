use mycoscope_common::MycoscopeError;

use crate::session::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid research request: {0}")]
    InvalidRequest(String),

    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },

    #[error("session is not open (state: {0})")]
    NotOpen(SessionState),

    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("listing files failed: {0}")]
    ListFailed(String),

    #[error("deleting file failed: {0}")]
    DeleteFailed(String),

    #[error("transfer request failed: {0}")]
    Transfer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SessionError {
    /// True for failures of the HTTP file-transfer channel.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            SessionError::UploadFailed(_)
                | SessionError::ListFailed(_)
                | SessionError::DeleteFailed(_)
                | SessionError::Transfer(_)
        )
    }
}

impl From<SessionError> for MycoscopeError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Io(e) => MycoscopeError::Io(e),
            e if e.is_transfer() => MycoscopeError::Transfer(e.to_string()),
            e => MycoscopeError::Session(e.to_string()),
        }
    }
}
