//! Seed data for the in-memory strategies.
//!
//! Three projects (including `legacy`) and a handful of decisions spread
//! across them. Hash values are arbitrary hex and mean nothing.

use chrono::{DateTime, Utc};

use control_room_core::decision::{DecisionRecord, HashVersion};
use control_room_core::project::{Project, ProjectId};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid fixture timestamp")
        .with_timezone(&Utc)
}

fn project(id: &str, label: &str, class: &str, tier: &str, created_at: &str) -> Project {
    let mut project = Project::new(
        ProjectId::parse(id).expect("valid fixture id"),
        label,
        at(created_at),
    )
    .expect("valid fixture label");
    project.project_class = Some(class.to_string());
    project.trust_tier = Some(tier.to_string());
    project
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project::legacy_fallback(),
        project(
            "medical-core",
            "Medical Core",
            "medical",
            "T3",
            "2026-01-05T09:00:00Z",
        )
        .with_description(Some("Clinical triage decisions".to_string())),
        project(
            "compliedocs-core",
            "ComplieDocs – Compliance",
            "legal",
            "T2",
            "2026-01-08T14:30:00Z",
        ),
    ]
}

fn decision(
    decision_id: &str,
    project_id: &str,
    hash_version: HashVersion,
    status: &str,
    created_at: &str,
    decision_type: &str,
) -> DecisionRecord {
    let seed = decision_id
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    DecisionRecord {
        decision_id: decision_id.to_string(),
        project_id: project_id.to_string(),
        hash_version: Some(hash_version),
        payload_hash: Some(format!("{seed:016x}{:016x}", seed.rotate_left(17))),
        context_hash: Some(format!("{:016x}{seed:016x}", seed.rotate_left(29))),
        status: status.to_string(),
        created_at: created_at.to_string(),
        decision_type: Some(decision_type.to_string()),
    }
}

pub fn seed_decisions() -> Vec<DecisionRecord> {
    vec![
        decision(
            "EVE-2025-000417",
            "legacy",
            HashVersion::V1,
            "SEALED",
            "2025-11-20T10:12:44+00:00",
            "GOVERNANCE_APPROVAL",
        ),
        decision(
            "EVE-2026-000002",
            "medical-core",
            HashVersion::V2,
            "SEALED",
            "2026-01-12T09:30:00+00:00",
            "CLASSIFICATION",
        ),
        decision(
            "EVE-2026-000003",
            "medical-core",
            HashVersion::V2,
            "PENDING_APPROVAL",
            "2026-01-14T16:05:12+00:00",
            "RISK_ACCEPTANCE",
        ),
        decision(
            "EVE-2026-000004",
            "compliedocs-core",
            HashVersion::V2,
            "SEALED",
            "2026-01-20T08:45:31+00:00",
            "DATA_APPROVAL",
        ),
    ]
}
