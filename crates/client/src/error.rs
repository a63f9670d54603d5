use control_room_core::error::CoreError;

/// Errors from the backend client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A domain-level error (validation, not found, read-only).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, reading the body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered 2xx with a body that does not decode.
    #[error("Malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend answered a project-scoped query with another project's record.
    #[error(
        "Backend returned decision {decision_id} for project '{found}' \
         in a query scoped to '{requested}'"
    )]
    ScopeViolation {
        requested: String,
        found: String,
        decision_id: String,
    },
}

impl ClientError {
    /// Whether this error means the backend could not be reached or
    /// did not answer successfully, as opposed to a local rejection.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Api { status, .. } => *status != 404,
            Self::Core(_) | Self::Decode(_) | Self::ScopeViolation { .. } => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
