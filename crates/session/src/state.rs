//! The session's single current-project slot.
//!
//! [`SessionState`] is built once at startup and handed to whatever needs
//! the current project. It owns the slot outright: readers go through
//! [`SessionState::current`] or [`SessionState::require_current`] and never
//! keep their own copy past one request.

use control_room_core::error::CoreError;
use control_room_core::project::Project;

use crate::error::SessionResult;
use crate::store::SessionStore;

/// Marks which session generation a request was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket(u64);

/// A fetched value tagged with the ticket of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoped<T> {
    pub ticket: SessionTicket,
    pub value: T,
}

/// Holder of the current project, backed by a durable store.
#[derive(Debug)]
pub struct SessionState<S: SessionStore> {
    store: S,
    current: Option<Project>,
    epoch: u64,
}

impl<S: SessionStore> SessionState<S> {
    /// An empty session. Whatever `store` holds is not loaded.
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
            epoch: 0,
        }
    }

    /// Make `project` current and persist its id, replacing any previous one.
    ///
    /// The reserved legacy project is refused. If persisting fails the
    /// previous selection stays in place.
    pub fn set_current(&mut self, project: Project) -> SessionResult<()> {
        if project.is_legacy() {
            return Err(CoreError::Validation(
                "The legacy project cannot be selected".to_string(),
            )
            .into());
        }
        self.store.save(project.project_id().as_str())?;
        tracing::info!(project_id = %project.project_id(), "Project selected");
        self.current = Some(project);
        self.epoch += 1;
        Ok(())
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// The current project, or [`CoreError::NoProjectSelected`].
    pub fn require_current(&self) -> Result<&Project, CoreError> {
        self.current.as_ref().ok_or(CoreError::NoProjectSelected)
    }

    /// The id persisted by an earlier session, if any.
    ///
    /// Only a hint for restoration: it still has to resolve through the
    /// directory before it may become current.
    pub fn load_persisted_id(&self) -> SessionResult<Option<String>> {
        Ok(self.store.load()?)
    }

    /// Forget the current project and its persisted id.
    pub fn clear(&mut self) -> SessionResult<()> {
        self.store.remove()?;
        if let Some(previous) = self.current.take() {
            tracing::info!(project_id = %previous.project_id(), "Project cleared");
        }
        self.epoch += 1;
        Ok(())
    }

    /// Ticket for a request issued now.
    pub fn ticket(&self) -> SessionTicket {
        SessionTicket(self.epoch)
    }

    /// Whether the session is still the one `ticket` was issued under.
    pub fn is_live(&self, ticket: SessionTicket) -> bool {
        ticket.0 == self.epoch
    }

    /// Unwrap a result, or drop it if the session changed while it was in flight.
    pub fn accept<T>(&self, scoped: Scoped<T>) -> Option<T> {
        if self.is_live(scoped.ticket) {
            Some(scoped.value)
        } else {
            tracing::debug!("Discarding result from a superseded session");
            None
        }
    }
}
