//! Remote store adapter.
//!
//! The remote store is the source of truth when reachable. Reads degrade to the
//! local store on failure; writes never do.

mod postgrest;
mod rows;
mod sqlite;

pub use postgrest::*;
pub use rows::*;
pub use sqlite::*;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::local::LocalStore;
use crate::models::{NewProject, PortfolioSettings, Project, ProjectUpdate};

/// Table-level operations against the remote `projects` and `settings` tables.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All project rows, newest `created_at` first.
    async fn select_projects(&self) -> Result<Vec<ProjectRow>, AppError>;

    /// Insert one row and return it as stored.
    async fn insert_project(&self, row: NewProjectRow) -> Result<ProjectRow, AppError>;

    /// Apply sparse changes to the row with `id` and return it as stored.
    async fn update_project(&self, id: &str, changes: ProjectChanges)
        -> Result<ProjectRow, AppError>;

    async fn delete_project(&self, id: &str) -> Result<(), AppError>;

    /// The first settings row, if one exists.
    async fn select_settings(&self) -> Result<Option<SettingsRow>, AppError>;

    /// Identity of the existing settings row, if any.
    async fn settings_id(&self) -> Result<Option<String>, AppError>;

    async fn insert_settings(&self, payload: SettingsPayload) -> Result<SettingsRow, AppError>;

    async fn update_settings(
        &self,
        id: &str,
        payload: SettingsPayload,
    ) -> Result<SettingsRow, AppError>;
}

/// Maps between application models and remote rows and owns the read fallback.
#[derive(Clone)]
pub struct RemoteAdapter {
    remote: Arc<dyn RemoteStore>,
    local: LocalStore,
}

impl RemoteAdapter {
    pub fn new(remote: Arc<dyn RemoteStore>, local: LocalStore) -> Self {
        Self { remote, local }
    }

    /// All projects, newest first. Falls back to the local store on any remote error.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, AppError> {
        match self.remote.select_projects().await {
            Ok(rows) => Ok(rows.into_iter().map(Project::from).collect()),
            Err(e) => {
                tracing::warn!("Remote project fetch failed, using local fallback: {}", e);
                let local = self.local.clone();
                tokio::task::spawn_blocking(move || local.get_projects()).await?
            }
        }
    }

    pub async fn create_project(&self, project: NewProject) -> Result<Project, AppError> {
        let row = self
            .remote
            .insert_project(NewProjectRow::from(project))
            .await
            .inspect_err(|e| tracing::error!("Error creating project: {}", e))?;
        Ok(row.into())
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, AppError> {
        let changes = ProjectChanges::new(update, Utc::now());
        let row = self
            .remote
            .update_project(id, changes)
            .await
            .inspect_err(|e| tracing::error!("Error updating project {}: {}", id, e))?;
        Ok(row.into())
    }

    /// Returns `false` instead of an error when the remote delete fails.
    pub async fn delete_project(&self, id: &str) -> bool {
        match self.remote.delete_project(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error deleting project {}: {}", id, e);
                false
            }
        }
    }

    /// The settings singleton. Falls back to the local store when the remote
    /// errors or holds no row yet.
    pub async fn fetch_settings(&self) -> Result<PortfolioSettings, AppError> {
        match self.remote.select_settings().await {
            Ok(Some(row)) => return Ok(row.into()),
            Ok(None) => tracing::warn!("No remote settings row, using local settings"),
            Err(e) => tracing::warn!("Remote settings fetch failed, using local fallback: {}", e),
        }

        let local = self.local.clone();
        tokio::task::spawn_blocking(move || local.get_settings()).await?
    }

    /// Update the existing settings row, or insert one if none exists yet.
    pub async fn save_settings(
        &self,
        settings: PortfolioSettings,
    ) -> Result<PortfolioSettings, AppError> {
        let existing = self
            .remote
            .settings_id()
            .await
            .inspect_err(|e| tracing::error!("Error checking settings: {}", e))?;

        let payload = SettingsPayload::new(settings, Utc::now());
        let row = match existing {
            Some(id) => self.remote.update_settings(&id, payload).await?,
            None => self.remote.insert_settings(payload).await?,
        };
        Ok(row.into())
    }
}
