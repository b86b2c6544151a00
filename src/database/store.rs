use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{NewProject, NewUser, Project, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Record changed since version {expected}")]
    Conflict { expected: i64 },

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Durable project storage. Every lookup skips removed projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Active projects owned by `author`, oldest first.
    async fn list_by_author(&self, author: Uuid) -> Result<Vec<Project>, StoreError>;

    async fn get_active(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    async fn insert(&self, project: NewProject) -> Result<Project, StoreError>;

    /// Replace name and metadata if the stored version still equals
    /// `expected_version`, bumping the version by one.
    async fn update_content(
        &self,
        id: Uuid,
        expected_version: i64,
        name: &str,
        metadata: &str,
    ) -> Result<Project, StoreError>;

    /// Mark the active project `id` owned by `author` as shared. `None` when
    /// no such project exists.
    async fn mark_shared(&self, id: Uuid, author: Uuid) -> Result<Option<Project>, StoreError>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
}
