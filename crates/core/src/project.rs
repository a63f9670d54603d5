//! Project record, identifier rules, and creation requests.
//!
//! A [`ProjectId`] can only be built from a string that matches
//! [`PROJECT_ID_PATTERN`], so every [`Project`] in the process carries a
//! well-formed identifier. Creation additionally rejects the reserved
//! [`LEGACY_PROJECT_ID`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::{placeholder_timestamp, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Identifier shape: 2-64 chars of `[a-z0-9-]`, no leading or trailing hyphen.
pub const PROJECT_ID_PATTERN: &str = r"^[a-z0-9][a-z0-9-]{0,62}[a-z0-9]$";

/// Identifier used by pre-existing, unscoped backend records.
pub const LEGACY_PROJECT_ID: &str = "legacy";

static PROJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROJECT_ID_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the shape of a project identifier.
///
/// `"legacy"` passes: it is well-formed, just not creatable.
pub fn validate_project_id(project_id: &str) -> Result<(), CoreError> {
    if project_id.is_empty() {
        return Err(CoreError::Validation(
            "Project id must not be empty".to_string(),
        ));
    }
    if !PROJECT_ID_RE.is_match(project_id) {
        return Err(CoreError::Validation(format!(
            "Invalid project id '{project_id}'. Must match: {PROJECT_ID_PATTERN}"
        )));
    }
    Ok(())
}

/// Validate an identifier for a project that is about to be created.
pub fn validate_new_project_id(project_id: &str) -> Result<(), CoreError> {
    validate_project_id(project_id)?;
    if project_id == LEGACY_PROJECT_ID {
        return Err(CoreError::Validation(format!(
            "Project id '{LEGACY_PROJECT_ID}' is reserved"
        )));
    }
    Ok(())
}

/// Validate a display label: must be non-empty after trimming.
pub fn validate_label(label: &str) -> Result<(), CoreError> {
    if label.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project label must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ProjectId
// ---------------------------------------------------------------------------

/// A well-formed project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Parse an identifier, checking only its shape.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        validate_project_id(value)?;
        Ok(Self(value.to_string()))
    }

    /// The reserved identifier of unscoped backend records.
    pub fn legacy() -> Self {
        Self(LEGACY_PROJECT_ID.to_string())
    }

    pub fn is_legacy(&self) -> bool {
        self.0 == LEGACY_PROJECT_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_project_id(&value)?;
        Ok(Self(value))
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Reserved
// ---------------------------------------------------------------------------

/// A field held for a future packaging layer.
///
/// Always serializes as `null` and only deserializes from `null` (or an
/// absent field via `#[serde(default)]`). It has no way to carry a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reserved;

impl Serialize for Reserved {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }
}

impl<'de> Deserialize<'de> for Reserved {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<IgnoredAny>::deserialize(deserializer)? {
            None => Ok(Reserved),
            Some(_) => Err(de::Error::custom("reserved field must be null")),
        }
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

/// A project as the control room sees it.
///
/// The identifier has no setter. `policy`, `license` and `sku` are
/// [`Reserved`] and stay null on every path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    project_id: ProjectId,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_tier: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    policy: Reserved,
    #[serde(default)]
    license: Reserved,
    #[serde(default)]
    sku: Reserved,
}

impl Project {
    /// Build an active project. The label is trimmed and must not be empty.
    pub fn new(
        project_id: ProjectId,
        label: &str,
        created_at: Timestamp,
    ) -> Result<Self, CoreError> {
        validate_label(label)?;
        Ok(Self::active(project_id, label.trim().to_string(), created_at))
    }

    /// Callers guarantee `label` is already trimmed and non-empty.
    pub(crate) fn active(project_id: ProjectId, label: String, created_at: Timestamp) -> Self {
        Self {
            project_id,
            label,
            description: None,
            status: ProjectStatus::Active,
            created_at,
            project_class: None,
            trust_tier: None,
            locked: false,
            policy: Reserved,
            license: Reserved,
            sku: Reserved,
        }
    }

    /// Materialize a validated creation request.
    pub fn from_new(request: NewProject, created_at: Timestamp) -> Self {
        Self::active(request.project_id, request.label, created_at)
            .with_description(request.description)
    }

    /// The synthetic record served when the registry cannot be reached.
    pub fn legacy_fallback() -> Self {
        let mut project = Self::active(
            ProjectId::legacy(),
            "Legacy (unscoped)".to_string(),
            placeholder_timestamp(),
        )
        .with_description(Some("Decisions recorded before project scoping".to_string()));
        project.project_class = Some("system".to_string());
        project.trust_tier = Some("T0".to_string());
        project.locked = true;
        project
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn is_legacy(&self) -> bool {
        self.project_id.is_legacy()
    }
}

// ---------------------------------------------------------------------------
// NewProject
// ---------------------------------------------------------------------------

/// A validated request to create a project.
///
/// Only [`NewProject::new`] builds one, so holding a value proves the
/// identifier, reserved-word and label rules were checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    project_id: ProjectId,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl NewProject {
    pub fn new(
        project_id: &str,
        label: &str,
        description: Option<&str>,
    ) -> Result<Self, CoreError> {
        validate_new_project_id(project_id)?;
        validate_label(label)?;
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(Self {
            project_id: ProjectId(project_id.to_string()),
            label: label.trim().to_string(),
            description,
        })
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
