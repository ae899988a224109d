//! Local data management endpoints.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: bool,
}

/// GET /api/local/export - Download the local snapshot.
pub async fn export_local(State(state): State<AppState>) -> Result<Response, AppError> {
    let service = state.service.clone();
    let snapshot = tokio::task::spawn_blocking(move || service.export_local()).await??;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"portfolio-data.json\"",
            ),
        ],
        snapshot,
    )
        .into_response())
}

/// POST /api/local/import - Replace local data from a snapshot body.
pub async fn import_local(State(state): State<AppState>, body: String) -> ApiResult<ImportResult> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("Import body is empty".to_string()));
    }
    let service = state.service.clone();
    let imported = tokio::task::spawn_blocking(move || service.import_local(&body)).await??;
    success(ImportResult { imported })
}

/// POST /api/local/reset - Restore the local seed data.
pub async fn reset_local(State(state): State<AppState>) -> ApiResult<()> {
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || service.reset_local()).await??;
    tracing::info!("Local data reset to defaults");
    success(())
}
