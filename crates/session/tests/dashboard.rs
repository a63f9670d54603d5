//! Project-bound decision views.

use std::sync::atomic::{AtomicUsize, Ordering};

use assert_matches::assert_matches;
use async_trait::async_trait;

use control_room_client::decisions::{DecisionQuery, MockDecisionQuery, FIXTURE_VERIFIED_STATUS};
use control_room_client::directory::MockProjectDirectory;
use control_room_client::error::{ClientError, ClientResult};
use control_room_core::decision::{BackendStatus, DecisionRecord, VerifyReport};
use control_room_core::error::CoreError;
use control_room_core::project::ProjectId;
use control_room_session::dashboard::{Dashboard, VerificationOutcome, FAILED_STATUS};
use control_room_session::error::SessionError;
use control_room_session::gate;
use control_room_session::state::SessionState;
use control_room_session::store::MemorySessionStore;

/// A decision backend that answers nothing.
struct BrokenBackend;

fn outage() -> ClientError {
    ClientError::Api {
        status: 502,
        body: "bad gateway".to_string(),
    }
}

#[async_trait]
impl DecisionQuery for BrokenBackend {
    async fn list(&self, _project_id: &ProjectId) -> ClientResult<Vec<DecisionRecord>> {
        Err(outage())
    }

    async fn get(&self, _decision_id: &str) -> ClientResult<DecisionRecord> {
        Err(outage())
    }

    async fn verify(&self, _decision_id: &str) -> ClientResult<VerifyReport> {
        Err(outage())
    }

    async fn backend_status(&self) -> ClientResult<BackendStatus> {
        Err(outage())
    }
}

/// Fixture backend that counts verification requests.
#[derive(Default)]
struct CountingBackend {
    inner: MockDecisionQuery,
    verifications: AtomicUsize,
}

#[async_trait]
impl DecisionQuery for CountingBackend {
    async fn list(&self, project_id: &ProjectId) -> ClientResult<Vec<DecisionRecord>> {
        self.inner.list(project_id).await
    }

    async fn get(&self, decision_id: &str) -> ClientResult<DecisionRecord> {
        self.inner.get(decision_id).await
    }

    async fn verify(&self, decision_id: &str) -> ClientResult<VerifyReport> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(decision_id).await
    }

    async fn backend_status(&self) -> ClientResult<BackendStatus> {
        self.inner.backend_status().await
    }
}

async fn session_on(project_id: &str) -> SessionState<MemorySessionStore> {
    let mut session = SessionState::new(MemorySessionStore::new());
    gate::select(&mut session, &MockProjectDirectory::seeded(), project_id)
        .await
        .unwrap();
    session
}

#[tokio::test]
async fn dashboard_requires_a_selection() {
    let session = SessionState::new(MemorySessionStore::with_value("medical-core"));
    let decisions = MockDecisionQuery::seeded();

    let result = Dashboard::open(&session, &decisions);

    assert_matches!(result, Err(CoreError::NoProjectSelected));
}

#[tokio::test]
async fn decisions_belong_to_selected_project() {
    let session = session_on("medical-core").await;
    let decisions = MockDecisionQuery::seeded();
    let dashboard = Dashboard::open(&session, &decisions).unwrap();

    let records = session.accept(dashboard.decisions().await.unwrap()).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|d| d.project_id == "medical-core"));
}

#[tokio::test]
async fn decision_from_another_project_is_hidden() {
    let session = session_on("medical-core").await;
    let decisions = MockDecisionQuery::seeded();
    let dashboard = Dashboard::open(&session, &decisions).unwrap();

    let result = dashboard.decision("EVE-2026-000004").await;

    assert_matches!(
        result,
        Err(SessionError::Core(CoreError::NotFound { entity: "decision", .. }))
    );
    assert!(dashboard.decision("EVE-2026-000002").await.is_ok());
}

#[tokio::test]
async fn verification_reports_backend_status() {
    let session = session_on("medical-core").await;
    let decisions = MockDecisionQuery::seeded();
    let dashboard = Dashboard::open(&session, &decisions).unwrap();

    let outcome = session
        .accept(dashboard.verify("EVE-2026-000002").await)
        .unwrap();

    assert_eq!(outcome.status(), FIXTURE_VERIFIED_STATUS);
    assert!(!outcome.is_failed());
}

#[tokio::test]
async fn decision_from_another_project_is_not_verified() {
    let session = session_on("medical-core").await;
    let decisions = CountingBackend {
        inner: MockDecisionQuery::seeded(),
        ..Default::default()
    };
    let dashboard = Dashboard::open(&session, &decisions).unwrap();

    let outcome = dashboard.verify("EVE-2025-000417").await.value;
    assert_eq!(outcome.status(), FAILED_STATUS);
    assert_eq!(decisions.verifications.load(Ordering::SeqCst), 0);

    let outcome = dashboard.verify("EVE-2026-000003").await.value;
    assert_eq!(outcome.status(), FIXTURE_VERIFIED_STATUS);
    assert_eq!(decisions.verifications.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_decision_verifies_as_failed() {
    let session = session_on("medical-core").await;
    let decisions = MockDecisionQuery::seeded();
    let dashboard = Dashboard::open(&session, &decisions).unwrap();

    let outcome = dashboard.verify("EVE-2026-999999").await.value;

    assert_matches!(outcome, VerificationOutcome::Failed { .. });
    assert_eq!(outcome.status(), FAILED_STATUS);
}

#[tokio::test]
async fn backend_outage_is_failed_not_success() {
    let session = session_on("medical-core").await;
    let dashboard = Dashboard::open(&session, &BrokenBackend).unwrap();

    let outcome = dashboard.verify("EVE-2026-000002").await.value;
    assert_eq!(outcome.status(), FAILED_STATUS);

    let listing = dashboard.decisions().await;
    assert_matches!(listing, Err(SessionError::Client(ClientError::Api { status: 502, .. })));
}

#[tokio::test]
async fn results_arriving_after_switch_are_discarded() {
    let mut session = session_on("medical-core").await;
    let decisions = MockDecisionQuery::seeded();

    let in_flight = {
        let dashboard = Dashboard::open(&session, &decisions).unwrap();
        dashboard.decisions().await.unwrap()
    };
    gate::switch_project(&mut session).unwrap();
    gate::select(&mut session, &MockProjectDirectory::seeded(), "compliedocs-core")
        .await
        .unwrap();

    assert_eq!(session.accept(in_flight), None);
}
