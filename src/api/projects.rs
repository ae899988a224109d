//! Project API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{NewProject, Project, ProjectFilter, ProjectUpdate};
use crate::AppState;

/// Result of a delete request.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted: bool,
}

/// GET /api/projects - List projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Vec<Project>> {
    success(state.service.fetch_projects(&filter).await?)
}

/// GET /api/projects/{id} - Get a single project.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    match state.service.fetch_project(&id).await? {
        Some(project) => success(project),
        None => Err(AppError::NotFound(format!("Project {} not found", id))),
    }
}

/// POST /api/projects - Create a new project.
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<NewProject>,
) -> ApiResult<Project> {
    let project = state.service.create_project(request).await?;
    tracing::info!("Created project {}", project.id);
    success(project)
}

/// PUT /api/projects/{id} - Update a project.
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProjectUpdate>,
) -> ApiResult<Project> {
    success(state.service.update_project(&id, request).await?)
}

/// DELETE /api/projects/{id} - Delete a project.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResult> {
    let deleted = state.service.delete_project(&id).await;
    success(DeleteResult { deleted })
}
