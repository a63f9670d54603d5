use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use control_room_core::error::CoreError;
use control_room_core::project::{NewProject, Project, ProjectId};

use crate::error::ClientResult;
use crate::fixtures;

use super::{DirectoryListing, ProjectDirectory};

/// In-memory project directory for local runs and tests.
///
/// Accepts creations and stamps them with the current time.
pub struct MockProjectDirectory {
    projects: Mutex<Vec<Project>>,
}

impl MockProjectDirectory {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
        }
    }

    /// Directory pre-loaded with [`fixtures::seed_projects`].
    pub fn seeded() -> Self {
        Self::new(fixtures::seed_projects())
    }

    fn snapshot(&self) -> Vec<Project> {
        self.projects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MockProjectDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl ProjectDirectory for MockProjectDirectory {
    async fn list(&self) -> DirectoryListing {
        DirectoryListing::live(self.snapshot())
    }

    async fn get(&self, project_id: &ProjectId) -> ClientResult<Project> {
        self.snapshot()
            .into_iter()
            .find(|p| p.project_id() == project_id)
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "project",
                    id: project_id.to_string(),
                }
                .into()
            })
    }

    async fn create(&self, request: NewProject) -> ClientResult<Project> {
        let mut projects = self
            .projects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if projects
            .iter()
            .any(|p| p.project_id() == request.project_id())
        {
            return Err(CoreError::Conflict(format!(
                "Project '{}' already exists",
                request.project_id()
            ))
            .into());
        }
        let project = Project::from_new(request, Utc::now());
        projects.push(project.clone());
        tracing::info!(project_id = %project.project_id(), "Project created in fixture store");
        Ok(project)
    }
}
