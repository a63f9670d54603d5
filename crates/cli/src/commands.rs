//! Command dispatch.
//!
//! [`execute`] runs one [`Command`] against an already-restored session and
//! returns an [`Output`] for rendering. Commands that read decisions go
//! through a [`Dashboard`], so they fail with `NoProjectSelected` when the
//! gate has not been passed.

use serde::Serialize;

use control_room_client::backend::Backends;
use control_room_client::directory::DirectoryListing;
use control_room_core::decision::{BackendStatus, DecisionRecord};
use control_room_core::error::CoreError;
use control_room_core::project::{Project, ProjectId};
use control_room_session::dashboard::{Dashboard, VerificationOutcome};
use control_room_session::error::{SessionError, SessionResult};
use control_room_session::gate;
use control_room_session::state::{Scoped, SessionState};
use control_room_session::store::SessionStore;

use crate::cli::Command;

/// Result of a command, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Projects {
        #[serde(flatten)]
        listing: DirectoryListing,
        current: Option<ProjectId>,
    },
    Selected {
        project: Project,
    },
    Created {
        project: Project,
    },
    Current {
        project: Project,
    },
    Decisions {
        project_id: ProjectId,
        decisions: Vec<DecisionRecord>,
    },
    Decision {
        decision: DecisionRecord,
    },
    Verification {
        outcome: VerificationOutcome,
    },
    Switched,
    Status {
        backend: String,
        current: Option<ProjectId>,
        status: BackendStatus,
    },
}

/// Run `command` against `session`.
pub async fn execute<S: SessionStore>(
    command: &Command,
    session: &mut SessionState<S>,
    backends: &Backends,
) -> SessionResult<Output> {
    let directory = backends.directory.as_ref();
    let decisions = backends.decisions.as_ref();

    match command {
        Command::Projects => {
            let listing = gate::selection_screen(directory).await;
            Ok(Output::Projects {
                listing,
                current: current_id(session),
            })
        }
        Command::Select { project_id } => {
            let project = gate::select(session, directory, project_id).await?;
            Ok(Output::Selected { project })
        }
        Command::Create {
            project_id,
            label,
            description,
        } => {
            let project = gate::create_and_select(
                session,
                directory,
                project_id,
                label,
                description.as_deref(),
            )
            .await?;
            Ok(Output::Created { project })
        }
        Command::Current => Ok(Output::Current {
            project: session.require_current()?.clone(),
        }),
        Command::Decisions => {
            let dashboard = Dashboard::open(session, decisions)?;
            let records = settle(session, dashboard.decisions().await?)?;
            Ok(Output::Decisions {
                project_id: dashboard.project().project_id().clone(),
                decisions: records,
            })
        }
        Command::Decision { decision_id } => {
            let dashboard = Dashboard::open(session, decisions)?;
            let decision = settle(session, dashboard.decision(decision_id.trim()).await?)?;
            Ok(Output::Decision { decision })
        }
        Command::Verify { decision_id } => {
            let dashboard = Dashboard::open(session, decisions)?;
            let outcome = settle(session, dashboard.verify(decision_id.trim()).await)?;
            Ok(Output::Verification { outcome })
        }
        Command::Switch => {
            gate::switch_project(session)?;
            Ok(Output::Switched)
        }
        Command::Status => {
            let status = decisions.backend_status().await?;
            Ok(Output::Status {
                backend: backends.kind.to_string(),
                current: current_id(session),
                status,
            })
        }
    }
}

fn current_id<S: SessionStore>(session: &SessionState<S>) -> Option<ProjectId> {
    session.current().map(|p| p.project_id().clone())
}

fn settle<S: SessionStore, T>(session: &SessionState<S>, scoped: Scoped<T>) -> SessionResult<T> {
    session.accept(scoped).ok_or_else(|| {
        CoreError::Internal("project changed while the request was in flight".into()).into()
    })
}

/// A follow-up hint for errors the operator can fix.
pub fn hint(err: &SessionError) -> Option<&'static str> {
    match err {
        SessionError::Core(CoreError::NoProjectSelected) => {
            Some("Run `control-room projects` and then `control-room select <project-id>`.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_covers_missing_selection() {
        let err = SessionError::Core(CoreError::NoProjectSelected);
        assert!(hint(&err).unwrap().contains("select"));
    }

    #[test]
    fn no_hint_for_storage_errors() {
        let err = SessionError::Storage(std::io::Error::other("disk full"));
        assert_eq!(hint(&err), None);
    }
}
