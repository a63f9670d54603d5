use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use control_room_core::decision::{BackendStatus, DecisionRecord, VerifyReport};
use control_room_core::error::CoreError;
use control_room_core::project::ProjectId;

use crate::api::BackendApi;
use crate::error::{ClientError, ClientResult};

use super::{ensure_scoped, validate_decision_id, DecisionQuery};

/// Body of `GET /decisions`: a bare array or a `{ count, decisions }` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DecisionListBody {
    Bare(Vec<DecisionRecord>),
    Envelope { decisions: Vec<DecisionRecord> },
}

impl DecisionListBody {
    fn into_records(self) -> Vec<DecisionRecord> {
        match self {
            Self::Bare(records) => records,
            Self::Envelope { decisions } => decisions,
        }
    }
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    decision_id: &'a str,
}

/// Decision backend reached over HTTP.
pub struct HttpDecisionQuery {
    api: BackendApi,
}

impl HttpDecisionQuery {
    pub fn new(api: BackendApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DecisionQuery for HttpDecisionQuery {
    async fn list(&self, project_id: &ProjectId) -> ClientResult<Vec<DecisionRecord>> {
        let body: DecisionListBody = self
            .api
            .get_json("/decisions", &[("project_id", project_id.as_str())])
            .await?;
        let records = ensure_scoped(project_id, body.into_records())?;
        tracing::debug!(project_id = %project_id, count = records.len(), "Decisions loaded");
        Ok(records)
    }

    async fn get(&self, decision_id: &str) -> ClientResult<DecisionRecord> {
        validate_decision_id(decision_id)?;
        match self
            .api
            .get_item("/decision", decision_id.trim())
            .await
        {
            Err(ClientError::Api { status: 404, .. }) => Err(CoreError::NotFound {
                entity: "decision",
                id: decision_id.to_string(),
            }
            .into()),
            other => other,
        }
    }

    async fn verify(&self, decision_id: &str) -> ClientResult<VerifyReport> {
        validate_decision_id(decision_id)?;
        let report: VerifyReport = self
            .api
            .post_json(
                "/verify",
                &VerifyRequest {
                    decision_id: decision_id.trim(),
                },
            )
            .await?;
        tracing::info!(decision_id, status = %report.status, "Verification answered");
        Ok(report)
    }

    async fn backend_status(&self) -> ClientResult<BackendStatus> {
        self.api.get_json("/status", &[]).await
    }
}
