use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::{NewProject, NewUser, Project, ProjectStatus, User};
use crate::database::store::{ProjectStore, StoreError, UserStore};

const PROJECT_COLUMNS: &str = "id, name, author_id, template, metadata, status, \
     is_shared, is_forkable, source_id, version, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    author_id: Uuid,
    template: String,
    metadata: String,
    status: i16,
    is_shared: bool,
    is_forkable: bool,
    source_id: Option<Uuid>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = StoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::from_code(row.status).ok_or_else(|| {
            StoreError::Corrupt(format!("project {} has unknown status {}", row.id, row.status))
        })?;
        Ok(Project {
            id: row.id,
            name: row.name,
            author: row.author_id,
            template: row.template,
            metadata: row.metadata,
            status,
            is_shared: row.is_shared,
            is_forkable: row.is_forkable,
            source: row.source_id,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Project records in the `projects` table.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn list_by_author(&self, author: Uuid) -> Result<Vec<Project>, StoreError> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE author_id = $1 AND status <> $2 ORDER BY seq"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(author)
            .bind(ProjectStatus::Removed.code())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Project::try_from).collect()
    }

    async fn get_active(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND status <> $2");
        sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .bind(ProjectStatus::Removed.code())
            .fetch_optional(&self.pool)
            .await?
            .map(Project::try_from)
            .transpose()
    }

    async fn insert(&self, project: NewProject) -> Result<Project, StoreError> {
        let sql = format!(
            "INSERT INTO projects (id, name, author_id, template, metadata, status, is_shared, is_forkable, source_id) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&project.name)
            .bind(project.author)
            .bind(&project.template)
            .bind(&project.metadata)
            .bind(ProjectStatus::Active.code())
            .bind(project.is_forkable)
            .bind(project.source)
            .fetch_one(&self.pool)
            .await?;
        Project::try_from(row)
    }

    async fn update_content(
        &self,
        id: Uuid,
        expected_version: i64,
        name: &str,
        metadata: &str,
    ) -> Result<Project, StoreError> {
        let sql = format!(
            "UPDATE projects SET name = $3, metadata = $4, version = version + 1, updated_at = now() \
             WHERE id = $1 AND version = $2 AND status <> $5 \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .bind(expected_version)
            .bind(name)
            .bind(metadata)
            .bind(ProjectStatus::Removed.code())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Project::try_from(row),
            // Distinguish a lost race from a project that vanished
            None => match self.get_active(id).await? {
                Some(_) => Err(StoreError::Conflict { expected: expected_version }),
                None => Err(StoreError::NotFound),
            },
        }
    }

    async fn mark_shared(&self, id: Uuid, author: Uuid) -> Result<Option<Project>, StoreError> {
        let sql = format!(
            "UPDATE projects SET is_shared = TRUE, updated_at = now() \
             WHERE id = $1 AND author_id = $2 AND status <> $3 \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .bind(author)
            .bind(ProjectStatus::Removed.code())
            .fetch_optional(&self.pool)
            .await?
            .map(Project::try_from)
            .transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, display_name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, display_name) VALUES ($1, $2, $3, $4) \
             RETURNING id, username, email, display_name, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.display_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
