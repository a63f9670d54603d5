use control_room_client::error::ClientError;
use control_room_core::error::CoreError;

/// Errors from the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// The durable session store could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl SessionError {
    /// Whether the failure is a rejected input rather than an outage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::Validation(_))
                | Self::Client(ClientError::Core(CoreError::Validation(_)))
        )
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
