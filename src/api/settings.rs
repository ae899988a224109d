//! Settings API endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::PortfolioSettings;
use crate::AppState;

/// GET /api/settings - Get the portfolio settings.
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<PortfolioSettings> {
    success(state.service.fetch_settings().await?)
}

/// PUT /api/settings - Save the portfolio settings.
pub async fn save_settings(
    State(state): State<AppState>,
    Json(request): Json<PortfolioSettings>,
) -> ApiResult<PortfolioSettings> {
    success(state.service.save_settings(request).await?)
}
