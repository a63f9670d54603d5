//! Registry wire shapes and their conversion into [`Project`].
//!
//! The registry speaks a looser shape than the control room: no status, no
//! creation time, plus classification metadata. [`RegistryEntry`] accepts
//! both that shape and full project records, and the conversion is pure.

use serde::Deserialize;

use crate::project::{Project, ProjectId, ProjectStatus, Reserved};
use crate::types::{placeholder_timestamp, Timestamp};

/// A project as it arrives from a registry or project endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    pub project_id: ProjectId,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub project_class: Option<String>,
    #[serde(default)]
    pub trust_tier: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub policy: Reserved,
    #[serde(default)]
    pub license: Reserved,
    #[serde(default)]
    pub sku: Reserved,
}

/// Body of a project listing: a bare array or a `{ projects, count }` envelope.
///
/// Entries stay raw JSON here so that one bad entry does not spoil the rest;
/// [`RegistryListBody::into_listing`] converts them one by one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RegistryListBody {
    Bare(Vec<serde_json::Value>),
    Envelope { projects: Vec<serde_json::Value> },
}

/// A listing entry that could not be turned into a [`Project`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// The entry's `project_id`, if it carried a string one.
    pub project_id: Option<String>,
    pub reason: String,
}

/// Outcome of converting a listing body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistryListing {
    pub projects: Vec<Project>,
    pub skipped: Vec<SkippedEntry>,
}

impl RegistryListBody {
    pub fn into_listing(self) -> RegistryListing {
        let entries = match self {
            Self::Bare(entries) => entries,
            Self::Envelope { projects } => projects,
        };
        let mut listing = RegistryListing::default();
        for value in entries {
            let project_id = value
                .get("project_id")
                .and_then(|id| id.as_str())
                .map(str::to_string);
            match serde_json::from_value::<RegistryEntry>(value) {
                Ok(entry) => listing.projects.push(Project::from(entry)),
                Err(e) => listing.skipped.push(SkippedEntry {
                    project_id,
                    reason: e.to_string(),
                }),
            }
        }
        listing
    }
}

impl From<RegistryEntry> for Project {
    fn from(entry: RegistryEntry) -> Self {
        let created_at = entry.created_at.unwrap_or_else(placeholder_timestamp);
        // Registries are trusted for the label; an empty one still gets the id.
        let label = if entry.label.trim().is_empty() {
            entry.project_id.to_string()
        } else {
            entry.label.trim().to_string()
        };
        let mut project = Project::active(entry.project_id, label, created_at);
        project.description = entry.description;
        project.status = entry.status.unwrap_or_default();
        project.project_class = entry.project_class;
        project.trust_tier = entry.trust_tier;
        project.locked = entry.locked;
        project
    }
}
