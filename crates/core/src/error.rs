/// Domain errors shared by every layer of the control room.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backing directory does not accept writes.
    #[error("Read-only: {0}")]
    ReadOnly(String),

    /// An operation needed the current project but none has been selected.
    #[error("No project selected")]
    NoProjectSelected,

    #[error("Internal error: {0}")]
    Internal(String),
}
