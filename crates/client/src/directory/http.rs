use async_trait::async_trait;

use control_room_core::error::CoreError;
use control_room_core::project::{NewProject, Project, ProjectId};
use control_room_core::registry::{RegistryEntry, RegistryListBody};

use crate::api::BackendApi;
use crate::error::{ClientError, ClientResult};

use super::{DirectoryListing, ProjectDirectory};

/// Project directory backed by a registry over HTTP.
pub struct HttpProjectDirectory {
    api: BackendApi,
    projects_path: String,
    writable: bool,
}

impl HttpProjectDirectory {
    /// * `projects_path` - collection path, e.g. `/api/v1/projects`.
    /// * `writable` - whether the registry accepts `POST` to that path.
    pub fn new(api: BackendApi, projects_path: &str, writable: bool) -> Self {
        Self {
            api,
            projects_path: projects_path.trim_end_matches('/').to_string(),
            writable,
        }
    }
}

/// Reject a record that answers for a different id than the one asked for.
fn ensure_same_id(requested: &ProjectId, project: Project) -> ClientResult<Project> {
    if project.project_id() != requested {
        return Err(CoreError::Internal(format!(
            "Registry answered '{}' for project '{requested}'",
            project.project_id()
        ))
        .into());
    }
    Ok(project)
}

#[async_trait]
impl ProjectDirectory for HttpProjectDirectory {
    async fn list(&self) -> DirectoryListing {
        match self
            .api
            .get_json::<RegistryListBody>(&self.projects_path, &[])
            .await
        {
            Ok(body) => {
                let listing = body.into_listing();
                for skipped in &listing.skipped {
                    tracing::warn!(
                        project_id = skipped.project_id.as_deref().unwrap_or("<missing>"),
                        reason = %skipped.reason,
                        "Skipping malformed registry entry"
                    );
                }
                DirectoryListing::live(listing.projects)
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.api.url(&self.projects_path),
                    error = %e,
                    "Project registry unavailable, serving fallback listing"
                );
                DirectoryListing::fallback()
            }
        }
    }

    async fn get(&self, project_id: &ProjectId) -> ClientResult<Project> {
        match self
            .api
            .get_item::<RegistryEntry>(&self.projects_path, project_id.as_str())
            .await
        {
            Ok(entry) => ensure_same_id(project_id, Project::from(entry)),
            Err(e) if project_id.is_legacy() && (is_not_found(&e) || e.is_unavailable()) => {
                tracing::warn!(error = %e, "Serving fallback record for legacy project");
                Ok(Project::legacy_fallback())
            }
            Err(e) if is_not_found(&e) => Err(CoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, request: NewProject) -> ClientResult<Project> {
        if !self.writable {
            return Err(CoreError::ReadOnly(format!(
                "Project registry at {} does not accept new projects",
                self.api.base_url()
            ))
            .into());
        }
        let entry: RegistryEntry = self.api.post_json(&self.projects_path, &request).await?;
        let project = ensure_same_id(request.project_id(), Project::from(entry))?;
        tracing::info!(project_id = %project.project_id(), "Project created in registry");
        Ok(project)
    }
}

fn is_not_found(err: &ClientError) -> bool {
    matches!(err, ClientError::Api { status: 404, .. })
}
