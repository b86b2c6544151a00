use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{NewProject, NewUser, Project, ProjectStatus, User};
use crate::database::store::{ProjectStore, StoreError, UserStore};

/// Process-local project store. Records live in insertion order.
#[derive(Default)]
pub struct MemoryProjectStore {
    projects: RwLock<Vec<Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a project to removed. Not reachable over HTTP.
    pub async fn mark_removed(&self, id: Uuid) -> Result<(), StoreError> {
        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        project.status = ProjectStatus::Removed;
        project.updated_at = Utc::now();
        Ok(())
    }

    /// Fetch a project regardless of status.
    pub async fn get_any(&self, id: Uuid) -> Option<Project> {
        self.projects.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn list_by_author(&self, author: Uuid) -> Result<Vec<Project>, StoreError> {
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .filter(|p| p.author == author && !p.is_removed())
            .cloned()
            .collect())
    }

    async fn get_active(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == id && !p.is_removed()).cloned())
    }

    async fn insert(&self, project: NewProject) -> Result<Project, StoreError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: project.name,
            author: project.author,
            template: project.template,
            metadata: project.metadata,
            status: ProjectStatus::Active,
            is_shared: false,
            is_forkable: project.is_forkable,
            source: project.source,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn update_content(
        &self,
        id: Uuid,
        expected_version: i64,
        name: &str,
        metadata: &str,
    ) -> Result<Project, StoreError> {
        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id && !p.is_removed())
            .ok_or(StoreError::NotFound)?;
        if project.version != expected_version {
            return Err(StoreError::Conflict { expected: expected_version });
        }
        project.name = name.to_string();
        project.metadata = metadata.to_string();
        project.version += 1;
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn mark_shared(&self, id: Uuid, author: Uuid) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects
            .iter_mut()
            .find(|p| p.id == id && p.author == author && !p.is_removed())
        else {
            return Ok(None);
        };
        project.is_shared = true;
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            created_at: Utc::now(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }
}
