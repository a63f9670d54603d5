//! Decision queries and verification requests.
//!
//! Every listing is scoped to one [`ProjectId`]. Filtering happens on the
//! backend; the client only checks that the backend honoured the scope and
//! reports a [`ClientError::ScopeViolation`] when it did not.

mod fixture;
mod http;

pub use fixture::{MockDecisionQuery, FIXTURE_VERIFIED_STATUS};
pub use http::HttpDecisionQuery;

use async_trait::async_trait;

use control_room_core::decision::{BackendStatus, DecisionRecord, VerifyReport};
use control_room_core::error::CoreError;
use control_room_core::project::ProjectId;

use crate::error::{ClientError, ClientResult};

/// Source of decision records and verification answers.
#[async_trait]
pub trait DecisionQuery: Send + Sync {
    /// Decisions belonging to `project_id`, in backend order.
    async fn list(&self, project_id: &ProjectId) -> ClientResult<Vec<DecisionRecord>>;

    /// A single decision by id.
    async fn get(&self, decision_id: &str) -> ClientResult<DecisionRecord>;

    /// Ask the backend to verify a decision. The reported status is returned verbatim.
    async fn verify(&self, decision_id: &str) -> ClientResult<VerifyReport>;

    /// Service summary of the decision backend.
    async fn backend_status(&self) -> ClientResult<BackendStatus>;
}

/// Pass `records` through unchanged if every one belongs to `requested`.
pub fn ensure_scoped(
    requested: &ProjectId,
    records: Vec<DecisionRecord>,
) -> ClientResult<Vec<DecisionRecord>> {
    if let Some(stray) = records
        .iter()
        .find(|r| r.project_id != requested.as_str())
    {
        tracing::error!(
            requested = %requested,
            found = %stray.project_id,
            decision_id = %stray.decision_id,
            "Backend ignored project scope"
        );
        return Err(ClientError::ScopeViolation {
            requested: requested.to_string(),
            found: stray.project_id.clone(),
            decision_id: stray.decision_id.clone(),
        });
    }
    Ok(records)
}

/// Reject blank decision ids before any request goes out.
pub fn validate_decision_id(decision_id: &str) -> Result<(), CoreError> {
    if decision_id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Decision id must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::fixtures::seed_decisions;

    #[test]
    fn ensure_scoped_passes_matching_records() {
        let medical = ProjectId::parse("medical-core").unwrap();
        let records: Vec<_> = seed_decisions()
            .into_iter()
            .filter(|d| d.project_id == "medical-core")
            .collect();
        let out = ensure_scoped(&medical, records.clone()).unwrap();
        assert_eq!(out, records);
    }

    #[test]
    fn ensure_scoped_rejects_foreign_record() {
        let medical = ProjectId::parse("medical-core").unwrap();
        assert_matches!(
            ensure_scoped(&medical, seed_decisions()),
            Err(ClientError::ScopeViolation { found, .. }) if found == "legacy"
        );
    }

    #[test]
    fn blank_decision_id_is_invalid() {
        assert!(validate_decision_id("  ").is_err());
        assert!(validate_decision_id("EVE-2026-000002").is_ok());
    }
}
