use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{ButterData, ProjectSummary};
use crate::error::ApiError;
use crate::middleware::{ApiResult, AuthUser, Okay};
use crate::projects::ProjectForm;

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Serialize)]
pub struct SavedProject {
    pub project: ButterData,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forked: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub url: String,
    /// Metadata as a string; the editor parses it itself
    pub project: String,
}

#[derive(Debug, Serialize)]
pub struct Published {
    pub url: String,
}

/// GET /api/projects - projects saved by the requester
pub async fn project_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<ProjectList> {
    let projects = state.projects.list(user.user_id).await?;
    Ok(Okay::new(ProjectList { projects }))
}

/// POST /api/project - save a new project
pub async fn project_add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<ProjectForm>, JsonRejection>,
) -> ApiResult<SavedProject> {
    let Json(form) = body.map_err(invalid_body)?;
    let project = state.projects.create(user.user_id, &form).await?;

    Ok(Okay::new(SavedProject {
        url: state.projects.locations().editor_path(project.id),
        project: project.butter_data(),
        forked: None,
    }))
}

/// GET /api/project/:id - metadata of a project
pub async fn project_detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<ProjectDetail> {
    let id = parse_project_id(&id)?;
    let view = state.projects.view(user.user_id, id).await?;

    Ok(Okay::new(ProjectDetail {
        url: view.url,
        project: view.metadata,
    }))
}

/// POST /api/project/:id - save over a project, forking it when the
/// requester is not the author
pub async fn project_save(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<ProjectForm>, JsonRejection>,
) -> ApiResult<SavedProject> {
    let id = parse_project_id(&id)?;
    let Json(form) = body.map_err(invalid_body)?;
    let mutation = state.projects.mutate(user.user_id, id, &form).await?;
    let project = mutation.project();

    Ok(Okay::new(SavedProject {
        url: state.projects.locations().project_path(project.id),
        project: project.butter_data(),
        forked: Some(mutation.is_fork()),
    }))
}

/// POST /api/project/:id/publish - share a project in the community gallery
pub async fn project_publish(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Published> {
    // Unparseable ids get the same answer as projects the requester does not own
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::Forbidden)?;
    let url = state.projects.publish(user.user_id, id).await?;
    Ok(Okay::new(Published { url }))
}

fn parse_project_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected project body: {}", rejection.body_text());
    ApiError::bad_request(rejection.body_text())
}
