use async_trait::async_trait;

use control_room_core::decision::{BackendStatus, DecisionRecord, VerifyReport};
use control_room_core::error::CoreError;
use control_room_core::project::ProjectId;

use crate::error::ClientResult;
use crate::fixtures;

use super::{validate_decision_id, DecisionQuery};

/// Status every known fixture decision verifies with.
pub const FIXTURE_VERIFIED_STATUS: &str = "VERIFIED";

/// In-memory decision backend for local runs and tests.
pub struct MockDecisionQuery {
    decisions: Vec<DecisionRecord>,
}

impl MockDecisionQuery {
    pub fn new(decisions: Vec<DecisionRecord>) -> Self {
        Self { decisions }
    }

    /// Backend pre-loaded with [`fixtures::seed_decisions`].
    pub fn seeded() -> Self {
        Self::new(fixtures::seed_decisions())
    }

    fn find(&self, decision_id: &str) -> ClientResult<&DecisionRecord> {
        validate_decision_id(decision_id)?;
        self.decisions
            .iter()
            .find(|d| d.decision_id == decision_id.trim())
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "decision",
                    id: decision_id.to_string(),
                }
                .into()
            })
    }
}

impl Default for MockDecisionQuery {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl DecisionQuery for MockDecisionQuery {
    async fn list(&self, project_id: &ProjectId) -> ClientResult<Vec<DecisionRecord>> {
        // Plays the backend here, so filtering is the backend's filtering.
        Ok(self
            .decisions
            .iter()
            .filter(|d| d.project_id == project_id.as_str())
            .cloned()
            .collect())
    }

    async fn get(&self, decision_id: &str) -> ClientResult<DecisionRecord> {
        self.find(decision_id).cloned()
    }

    async fn verify(&self, decision_id: &str) -> ClientResult<VerifyReport> {
        let decision = self.find(decision_id)?;
        let mut details = serde_json::Map::new();
        details.insert(
            "decision_id".to_string(),
            serde_json::Value::String(decision.decision_id.clone()),
        );
        Ok(VerifyReport {
            status: FIXTURE_VERIFIED_STATUS.to_string(),
            details,
        })
    }

    async fn backend_status(&self) -> ClientResult<BackendStatus> {
        Ok(BackendStatus {
            service: Some("fixture backend".to_string()),
            version: None,
            status: "ONLINE".to_string(),
            decisions_count: Some(self.decisions.len() as u64),
        })
    }
}
