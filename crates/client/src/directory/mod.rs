//! Project directory: listing, lookup, and creation of projects.
//!
//! [`ProjectDirectory`] has two strategies, [`HttpProjectDirectory`] backed
//! by a project registry and [`MockProjectDirectory`] backed by in-memory
//! fixtures. Which one runs is decided once at startup (see
//! [`crate::backend`]).

mod fixture;
mod http;

pub use fixture::MockProjectDirectory;
pub use http::HttpProjectDirectory;

use async_trait::async_trait;
use serde::Serialize;

use control_room_core::project::{NewProject, Project, ProjectId};

use crate::error::ClientResult;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Where a [`DirectoryListing`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingSource {
    /// Answered by the directory itself.
    Live,
    /// The registry was unreachable; only the reserved legacy record is shown.
    Fallback,
}

/// Result of [`ProjectDirectory::list`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryListing {
    pub projects: Vec<Project>,
    pub source: ListingSource,
}

impl DirectoryListing {
    pub fn live(projects: Vec<Project>) -> Self {
        Self {
            projects,
            source: ListingSource::Live,
        }
    }

    /// The minimal listing served while the registry is down.
    pub fn fallback() -> Self {
        Self {
            projects: vec![Project::legacy_fallback()],
            source: ListingSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ListingSource::Fallback
    }

    /// Projects an operator may pick. `legacy` is listed but never selectable.
    pub fn selectable(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| !p.is_legacy())
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Source of project records.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// All known projects.
    ///
    /// Never fails: an unreachable registry yields
    /// [`DirectoryListing::fallback`] so the picker stays usable.
    async fn list(&self) -> DirectoryListing;

    /// Look up one project. Unknown ids fail with `CoreError::NotFound`.
    async fn get(&self, project_id: &ProjectId) -> ClientResult<Project>;

    /// Create a project from a validated request.
    ///
    /// Read-only directories fail with `CoreError::ReadOnly`.
    async fn create(&self, request: NewProject) -> ClientResult<Project>;
}

/// Validate raw form input, then create the project.
///
/// Validation failures return before the directory is touched.
pub async fn create_project(
    directory: &dyn ProjectDirectory,
    project_id: &str,
    label: &str,
    description: Option<&str>,
) -> ClientResult<Project> {
    let request = NewProject::new(project_id, label, description)?;
    tracing::debug!(project_id = %request.project_id(), "Creating project");
    directory.create(request).await
}
