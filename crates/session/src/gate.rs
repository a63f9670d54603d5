//! Project gate: nothing past this point runs without a selected project.
//!
//! On startup [`restore`] tries to bring back the project persisted by an
//! earlier session. If that does not work the caller shows the selection
//! screen, where [`select`] or [`create_and_select`] set the current project.
//! [`switch_project`] goes back to the selection screen.

use serde::Serialize;

use control_room_client::directory::{create_project, DirectoryListing, ProjectDirectory};
use control_room_core::error::CoreError;
use control_room_core::project::{Project, ProjectId};

use crate::error::SessionResult;
use crate::state::SessionState;
use crate::store::SessionStore;

/// Outcome of startup restoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Restoration {
    /// No earlier selection was stored.
    NothingStored,
    /// The stored id resolved and is now the current project.
    Restored { project: Project },
    /// The stored id was dropped; the operator has to pick again.
    Discarded { project_id: String, reason: String },
}

/// Restore the previously selected project, if it still resolves.
///
/// Never fails: every problem ends in [`Restoration::Discarded`] (with the
/// stored id removed) or [`Restoration::NothingStored`].
pub async fn restore<S: SessionStore>(
    session: &mut SessionState<S>,
    directory: &dyn ProjectDirectory,
) -> Restoration {
    let stored = match session.load_persisted_id() {
        Ok(Some(id)) => id,
        Ok(None) => return Restoration::NothingStored,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read persisted project id");
            return Restoration::NothingStored;
        }
    };

    match resolve_stored(&stored, directory).await {
        Ok(project) => match session.set_current(project.clone()) {
            Ok(()) => Restoration::Restored { project },
            Err(e) => discard(session, stored, e.to_string()),
        },
        Err(reason) => discard(session, stored, reason),
    }
}

async fn resolve_stored(stored: &str, directory: &dyn ProjectDirectory) -> Result<Project, String> {
    let project_id = ProjectId::parse(stored).map_err(|e| e.to_string())?;
    if project_id.is_legacy() {
        return Err("the legacy project is never restored".to_string());
    }
    directory
        .get(&project_id)
        .await
        .map_err(|e| e.to_string())
}

fn discard<S: SessionStore>(
    session: &mut SessionState<S>,
    project_id: String,
    reason: String,
) -> Restoration {
    tracing::warn!(project_id = %project_id, reason = %reason, "Discarding persisted project");
    if let Err(e) = session.clear() {
        tracing::warn!(error = %e, "Could not remove persisted project id");
    }
    Restoration::Discarded { project_id, reason }
}

/// The projects to offer on the selection screen.
pub async fn selection_screen(directory: &dyn ProjectDirectory) -> DirectoryListing {
    directory.list().await
}

/// Make the project with `project_id` current.
///
/// The id must be well formed, must not be `legacy`, and must resolve
/// through the directory.
pub async fn select<S: SessionStore>(
    session: &mut SessionState<S>,
    directory: &dyn ProjectDirectory,
    project_id: &str,
) -> SessionResult<Project> {
    let project_id = ProjectId::parse(project_id.trim())?;
    if project_id.is_legacy() {
        return Err(CoreError::Validation(
            "The legacy project cannot be selected".to_string(),
        )
        .into());
    }
    let project = directory.get(&project_id).await?;
    session.set_current(project.clone())?;
    Ok(project)
}

/// Create a project from form input and make it current.
pub async fn create_and_select<S: SessionStore>(
    session: &mut SessionState<S>,
    directory: &dyn ProjectDirectory,
    project_id: &str,
    label: &str,
    description: Option<&str>,
) -> SessionResult<Project> {
    let project = create_project(directory, project_id, label, description).await?;
    session.set_current(project.clone())?;
    Ok(project)
}

/// Leave the current project and return to the selection screen.
pub fn switch_project<S: SessionStore>(session: &mut SessionState<S>) -> SessionResult<()> {
    session.clear()
}
