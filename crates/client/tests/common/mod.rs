#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Shared state of a test backend: request counter plus behaviour switches.
#[derive(Default)]
pub struct TestBackend {
    pub hits: AtomicUsize,
    /// Answer every project-scoped decision query with all decisions.
    pub ignore_scope: bool,
    /// Answer every registry request with 503.
    pub registry_down: bool,
    /// Mix malformed entries into listings and populate `sku` on lookups.
    pub bad_entries: bool,
}

impl TestBackend {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Registry entries in the backend's own shape (no status, no timestamps).
pub fn registry_entries() -> Vec<Value> {
    vec![
        json!({
            "project_id": "legacy",
            "label": "Legacy",
            "project_class": "system",
            "trust_tier": "T0",
            "description": "Pre-v2 decisions",
            "locked": true
        }),
        json!({
            "project_id": "medical-core",
            "label": "Medical Core",
            "project_class": "medical",
            "trust_tier": "T3",
            "locked": false
        }),
    ]
}

pub fn decision_rows() -> Vec<Value> {
    vec![
        json!({
            "eve_decision_id": "EVE-2025-000417",
            "project_id": "legacy",
            "hash_version": "v1",
            "context_hash": "9f1c",
            "status": "SEALED",
            "created_at": "2025-11-20T10:12:44+00:00"
        }),
        json!({
            "eve_decision_id": "EVE-2026-000002",
            "project_id": "medical-core",
            "hash_version": "v2",
            "payload_hash": "77aa",
            "context_hash": "1b2c",
            "status": "SEALED",
            "created_at": "2026-01-12T09:30:00+00:00"
        }),
        json!({
            "eve_decision_id": "EVE-2026-000003",
            "project_id": "medical-core",
            "hash_version": "v2",
            "context_hash": "3d4e",
            "status": "PENDING_APPROVAL",
            "created_at": "2026-01-14T16:05:12+00:00"
        }),
    ]
}

type Shared = Arc<TestBackend>;

async fn list_projects(State(backend): State<Shared>) -> Response {
    backend.hit();
    if backend.registry_down {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let mut projects = registry_entries();
    if backend.bad_entries {
        projects.insert(
            1,
            json!({ "project_id": "Test_Sandbox", "label": "Sandbox", "locked": false }),
        );
        projects.push(json!({ "project_id": "energy-grid", "label": "Energy Grid", "sku": "pro" }));
    }
    Json(json!({ "count": projects.len(), "projects": projects })).into_response()
}

async fn get_project(State(backend): State<Shared>, Path(id): Path<String>) -> Response {
    backend.hit();
    if backend.registry_down {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    match registry_entries()
        .into_iter()
        .find(|p| p["project_id"] == id.as_str())
    {
        Some(mut entry) => {
            if backend.bad_entries {
                entry["sku"] = json!("pro");
            }
            Json(entry).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("Project not found: {id}") })),
        )
            .into_response(),
    }
}

async fn create_project(State(backend): State<Shared>, Json(mut body): Json<Value>) -> Response {
    backend.hit();
    body["created_at"] = json!("2026-03-01T08:00:00Z");
    body["status"] = json!("active");
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn list_decisions(
    State(backend): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.hit();
    let rows = decision_rows();
    let rows: Vec<Value> = match params.get("project_id") {
        Some(pid) if !backend.ignore_scope => rows
            .into_iter()
            .filter(|d| d["project_id"] == pid.as_str())
            .collect(),
        _ => rows,
    };
    Json(json!({ "count": rows.len(), "decisions": rows })).into_response()
}

async fn get_decision(State(backend): State<Shared>, Path(id): Path<String>) -> Response {
    backend.hit();
    match decision_rows()
        .into_iter()
        .find(|d| d["eve_decision_id"] == id.as_str())
    {
        Some(row) => Json(row).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn verify(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    backend.hit();
    match body["decision_id"].as_str() {
        Some("EVE-2026-000002") => Json(json!({
            "status": "Verified-with-Notes",
            "overall_valid": true
        }))
        .into_response(),
        Some("EVE-2026-000003") => Json(json!({ "status": "VERIFIED" })).into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "verification engine offline").into_response(),
    }
}

async fn status(State(backend): State<Shared>) -> Response {
    backend.hit();
    Json(json!({
        "service": "Decision API",
        "version": "1.1.0",
        "status": "ONLINE",
        "decisions_count": decision_rows().len()
    }))
    .into_response()
}

pub fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/v1/projects", get(list_projects).post(create_project))
        .route("/api/v1/projects/{id}", get(get_project))
        .route("/decisions", get(list_decisions))
        .route("/decision/{id}", get(get_decision))
        .route("/verify", post(verify))
        .route("/status", get(status))
        .with_state(backend)
}

/// Serve `backend` on an ephemeral local port and return its base URL.
pub async fn spawn(backend: Shared) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
