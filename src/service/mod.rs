//! Data access facade used by the HTTP layer.

use crate::errors::AppError;
use crate::local::LocalStore;
use crate::models::{NewProject, PortfolioSettings, Project, ProjectFilter, ProjectUpdate};
use crate::remote::RemoteAdapter;

/// Single entry point for reading and writing portfolio data.
///
/// Reads go through the remote adapter, which owns the local fallback.
/// Writes go to the remote only and surface their errors.
#[derive(Clone)]
pub struct PortfolioService {
    remote: RemoteAdapter,
    local: LocalStore,
}

impl PortfolioService {
    pub fn new(remote: RemoteAdapter, local: LocalStore) -> Self {
        Self { remote, local }
    }

    pub async fn fetch_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let projects = self.remote.fetch_projects().await?;
        Ok(projects.into_iter().filter(|p| filter.matches(p)).collect())
    }

    pub async fn fetch_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        let projects = self.remote.fetch_projects().await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    pub async fn fetch_settings(&self) -> Result<PortfolioSettings, AppError> {
        self.remote.fetch_settings().await
    }

    pub async fn create_project(&self, project: NewProject) -> Result<Project, AppError> {
        project.validate()?;
        self.remote.create_project(project.normalized()).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, AppError> {
        update.validate()?;
        self.remote.update_project(id, update.normalized()).await
    }

    pub async fn delete_project(&self, id: &str) -> bool {
        self.remote.delete_project(id).await
    }

    pub async fn save_settings(
        &self,
        settings: PortfolioSettings,
    ) -> Result<PortfolioSettings, AppError> {
        settings.validate()?;
        self.remote.save_settings(settings).await
    }

    // ==================== LOCAL DATA MANAGEMENT ====================

    pub fn export_local(&self) -> Result<String, AppError> {
        self.local.export_data()
    }

    pub fn import_local(&self, snapshot: &str) -> Result<bool, AppError> {
        self.local.import_data(snapshot)
    }

    pub fn reset_local(&self) -> Result<(), AppError> {
        self.local.reset_all_data()
    }
}
