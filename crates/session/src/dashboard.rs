//! Project dashboard: decision views bound to the current project.
//!
//! A [`Dashboard`] can only be opened while a project is selected, and every
//! query it issues carries that project's id. Results come back as
//! [`Scoped`] values; pass them through [`SessionState::accept`] so results
//! that arrive after a project switch are dropped.

use serde::Serialize;

use control_room_client::decisions::DecisionQuery;
use control_room_core::decision::{DecisionRecord, VerifyReport};
use control_room_core::error::CoreError;
use control_room_core::project::Project;

use crate::error::SessionResult;
use crate::state::{Scoped, SessionState, SessionTicket};
use crate::store::SessionStore;

/// Status shown for a verification attempt that did not get an answer.
pub const FAILED_STATUS: &str = "FAILED";

/// What the operator sees after asking for verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The backend answered; `status` is exactly what it reported.
    Reported { decision_id: String, status: String },
    /// The request failed; shown as [`FAILED_STATUS`].
    Failed { decision_id: String, reason: String },
}

impl VerificationOutcome {
    pub fn status(&self) -> &str {
        match self {
            Self::Reported { status, .. } => status,
            Self::Failed { .. } => FAILED_STATUS,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Decision views for the project that was current when the dashboard opened.
pub struct Dashboard<'a> {
    project: Project,
    ticket: SessionTicket,
    decisions: &'a dyn DecisionQuery,
}

impl std::fmt::Debug for Dashboard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("project", &self.project)
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

impl<'a> Dashboard<'a> {
    /// Open the dashboard for the current project.
    ///
    /// Fails with [`CoreError::NoProjectSelected`] when nothing is selected.
    pub fn open<S: SessionStore>(
        session: &SessionState<S>,
        decisions: &'a dyn DecisionQuery,
    ) -> Result<Self, CoreError> {
        let project = session.require_current()?.clone();
        Ok(Self {
            project,
            ticket: session.ticket(),
            decisions,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn scoped<T>(&self, value: T) -> Scoped<T> {
        Scoped {
            ticket: self.ticket,
            value,
        }
    }

    /// Decisions of the dashboard's project.
    pub async fn decisions(&self) -> SessionResult<Scoped<Vec<DecisionRecord>>> {
        let records = self.decisions.list(self.project.project_id()).await?;
        Ok(self.scoped(records))
    }

    /// One decision, provided it belongs to the dashboard's project.
    pub async fn decision(&self, decision_id: &str) -> SessionResult<Scoped<DecisionRecord>> {
        let record = self.decisions.get(decision_id).await?;
        if record.project_id != self.project.project_id().as_str() {
            return Err(CoreError::NotFound {
                entity: "decision",
                id: format!("{decision_id} in project {}", self.project.project_id()),
            }
            .into());
        }
        Ok(self.scoped(record))
    }

    /// Request verification of a decision of the dashboard's project.
    ///
    /// Failures, including a decision from another project, become
    /// [`VerificationOutcome::Failed`]; out-of-project ids are never sent
    /// for verification.
    pub async fn verify(&self, decision_id: &str) -> Scoped<VerificationOutcome> {
        let outcome = match self.verify_in_project(decision_id).await {
            Ok(report) => VerificationOutcome::Reported {
                decision_id: decision_id.to_string(),
                status: report.status,
            },
            Err(e) => {
                tracing::warn!(decision_id, error = %e, "Verification request failed");
                VerificationOutcome::Failed {
                    decision_id: decision_id.to_string(),
                    reason: e.to_string(),
                }
            }
        };
        self.scoped(outcome)
    }

    async fn verify_in_project(&self, decision_id: &str) -> SessionResult<VerifyReport> {
        self.decision(decision_id).await?;
        Ok(self.decisions.verify(decision_id).await?)
    }
}
