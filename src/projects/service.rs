use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GalleryConfig;
use crate::database::models::{NewProject, Project, ProjectSummary};
use crate::database::ProjectStore;
use crate::projects::access::{self, MutationGrant};
use crate::projects::error::ProjectError;
use crate::projects::form::ProjectForm;
use crate::projects::urls::Locations;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Updated(Project),
    /// The requester did not own the project, so the save landed in a new fork.
    Forked(Project),
}

impl Mutation {
    pub fn project(&self) -> &Project {
        match self {
            Mutation::Updated(project) | Mutation::Forked(project) => project,
        }
    }

    pub fn is_fork(&self) -> bool {
        matches!(self, Mutation::Forked(_))
    }
}

/// Metadata of a project plus where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub metadata: String,
    pub url: String,
}

/// Project operations on behalf of an authenticated requester.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
    gallery: Arc<GalleryConfig>,
    locations: Locations,
}

impl ProjectService {
    pub fn new(
        store: Arc<dyn ProjectStore>,
        gallery: Arc<GalleryConfig>,
    ) -> Result<Self, url::ParseError> {
        let locations = Locations::new(&gallery.site_url)?;
        Ok(Self {
            store,
            gallery,
            locations,
        })
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub async fn list(&self, requester: Uuid) -> Result<Vec<ProjectSummary>, ProjectError> {
        let projects = self.store.list_by_author(requester).await?;
        debug!("Listing {} projects for {}", projects.len(), requester);
        Ok(projects.iter().map(Project::summary).collect())
    }

    pub async fn create(&self, requester: Uuid, form: &ProjectForm) -> Result<Project, ProjectError> {
        let cleaned = form.clean(&self.gallery)?;
        let project = self
            .store
            .insert(NewProject {
                name: cleaned.name,
                author: requester,
                template: cleaned.template,
                metadata: cleaned.metadata,
                is_forkable: cleaned.is_forkable.unwrap_or(self.gallery.forkable_by_default),
                source: None,
            })
            .await?;
        info!("Created project {} for {}", project.id, requester);
        Ok(project)
    }

    /// Active project by id. Reads are not gated by ownership.
    pub async fn get(&self, id: Uuid) -> Result<Project, ProjectError> {
        self.store.get_active(id).await?.ok_or(ProjectError::NotFound)
    }

    pub async fn view(&self, requester: Uuid, id: Uuid) -> Result<ProjectView, ProjectError> {
        let project = self.get(id).await?;
        debug!("Project {} viewed by {}", project.id, requester);
        Ok(ProjectView {
            url: self.locations.project_path(project.id),
            metadata: project.metadata,
        })
    }

    /// Save a new name and metadata. Authors update in place, other users
    /// get a fork when the project allows it.
    pub async fn mutate(
        &self,
        requester: Uuid,
        id: Uuid,
        form: &ProjectForm,
    ) -> Result<Mutation, ProjectError> {
        let project = self.get(id).await?;
        let grant = access::authorize_mutation(requester, &project);
        if grant == MutationGrant::Denied {
            warn!("Denied save of project {} by non-author {}", project.id, requester);
            return Err(ProjectError::PermissionDenied);
        }

        // Checked before any fork is inserted
        let cleaned = form.clean(&self.gallery)?;

        match grant {
            MutationGrant::InPlace => {
                let expected = cleaned.version.unwrap_or(project.version);
                if expected != project.version {
                    warn!(
                        "Rejected save of project {} at version {} (current {})",
                        project.id, expected, project.version
                    );
                    return Err(ProjectError::Conflict { expected });
                }
                let updated = self
                    .store
                    .update_content(project.id, expected, &cleaned.name, &cleaned.metadata)
                    .await?;
                info!("Updated project {} to version {}", updated.id, updated.version);
                Ok(Mutation::Updated(updated))
            }
            MutationGrant::Fork => {
                let mut new_project =
                    access::fork(&project, requester, self.gallery.forkable_by_default);
                new_project.name = cleaned.name;
                new_project.metadata = cleaned.metadata;
                let forked = self.store.insert(new_project).await?;
                info!("Forked project {} into {} for {}", project.id, forked.id, requester);
                Ok(Mutation::Forked(forked))
            }
            MutationGrant::Denied => Err(ProjectError::PermissionDenied),
        }
    }

    /// Share a project the requester owns. Returns its absolute public URL.
    pub async fn publish(&self, requester: Uuid, id: Uuid) -> Result<String, ProjectError> {
        let Some(project) = self.store.mark_shared(id, requester).await? else {
            warn!("Denied publish of project {} by {}", id, requester);
            return Err(ProjectError::PermissionDenied);
        };
        info!("Published project {}", project.id);
        Ok(self.locations.public_url(project.id))
    }
}
