//! Decision records and verification reports.
//!
//! Everything here is produced by the backend. Hash fields are opaque
//! strings carried through untouched.

use serde::{Deserialize, Serialize};

/// Which backend hashing scheme produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVersion {
    /// Pre-scoping hash model used by `legacy` records.
    V1,
    /// Project-scoped hash model.
    V2,
}

impl HashVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

/// An immutable decision record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(alias = "eve_decision_id")]
    pub decision_id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub hash_version: Option<HashVersion>,
    #[serde(default)]
    pub payload_hash: Option<String>,
    #[serde(default)]
    pub context_hash: Option<String>,
    pub status: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_type: Option<String>,
}

/// The backend's answer to a verification request.
///
/// `status` is reported verbatim; any other fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Backend service summary from `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub status: String,
    #[serde(default)]
    pub decisions_count: Option<u64>,
}
