//! Local fallback store.
//!
//! Synchronous persistence of the project collection and the settings singleton
//! over an injected key-value provider. Empty entries are seeded on first read.

mod seed;
mod storage;

pub use seed::*;
pub use storage::*;

use std::sync::Arc;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;
use crate::models::{
    next_timestamp, Category, NewProject, PortfolioSettings, Project, ProjectStatus,
    ProjectUpdate, SettingsUpdate, Snapshot,
};

pub const PROJECTS_KEY: &str = "portfolio_projects";
pub const SETTINGS_KEY: &str = "portfolio_settings";
pub const INITIALIZED_KEY: &str = "portfolio_initialized";

/// Project and settings persistence backed by a [`StorageProvider`].
#[derive(Clone)]
pub struct LocalStore {
    storage: Arc<dyn StorageProvider>,
}

impl LocalStore {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Clear entries left by an earlier deployment the first time this store
    /// is opened. Returns whether a reset happened.
    pub fn initialize(&self) -> Result<bool, AppError> {
        if self.storage.get(INITIALIZED_KEY)?.is_some() {
            return Ok(false);
        }

        self.storage.remove(PROJECTS_KEY)?;
        self.storage.remove(SETTINGS_KEY)?;
        self.storage.set(INITIALIZED_KEY, b"true")?;
        tracing::info!("Local store initialized with fresh data");
        Ok(true)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let Some(bytes) = self.storage.get(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("Corrupt local entry {}: {}", key, e)))
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(value)?;
        self.storage.set(key, &bytes)
    }

    // ==================== PROJECT OPERATIONS ====================

    /// Get all projects, seeding the sample set if nothing is stored.
    pub fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        if let Some(projects) = self.read(PROJECTS_KEY)? {
            return Ok(projects);
        }

        let seed = sample_projects(Utc::now());
        self.set_projects(&seed)?;
        Ok(seed)
    }

    /// Replace the whole project collection.
    pub fn set_projects(&self, projects: &[Project]) -> Result<(), AppError> {
        self.write(PROJECTS_KEY, &projects)
    }

    pub fn get_project_by_id(&self, id: &str) -> Result<Option<Project>, AppError> {
        Ok(self.get_projects()?.into_iter().find(|p| p.id == id))
    }

    /// Append a new project with a fresh identity.
    pub fn add_project(&self, project: NewProject) -> Result<Project, AppError> {
        let mut projects = self.get_projects()?;
        let project = project.into_project(uuid::Uuid::new_v4().to_string(), Utc::now());
        tracing::debug!("Adding local project {}", project.id);

        projects.push(project.clone());
        self.set_projects(&projects)?;
        Ok(project)
    }

    /// Merge `update` into the project with `id`. Returns `None` if no such project exists.
    pub fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Option<Project>, AppError> {
        let mut projects = self.get_projects()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        let now = next_timestamp(project.updated_at);
        project.apply(update, now);
        let updated = project.clone();

        self.set_projects(&projects)?;
        Ok(Some(updated))
    }

    /// Remove the project with `id`. Returns whether anything was removed.
    pub fn delete_project(&self, id: &str) -> Result<bool, AppError> {
        let projects = self.get_projects()?;
        let before = projects.len();
        let remaining: Vec<Project> = projects.into_iter().filter(|p| p.id != id).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.set_projects(&remaining)?;
        Ok(true)
    }

    pub fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self
            .get_projects()?
            .into_iter()
            .filter(|p| p.featured)
            .collect())
    }

    pub fn get_projects_by_category(&self, category: Category) -> Result<Vec<Project>, AppError> {
        Ok(self
            .get_projects()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    pub fn get_projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, AppError> {
        Ok(self
            .get_projects()?
            .into_iter()
            .filter(|p| p.status == status)
            .collect())
    }

    // ==================== SETTINGS OPERATIONS ====================

    /// Get the settings, seeding the defaults if nothing is stored.
    pub fn get_settings(&self) -> Result<PortfolioSettings, AppError> {
        if let Some(settings) = self.read(SETTINGS_KEY)? {
            return Ok(settings);
        }

        let defaults = default_settings();
        self.set_settings(&defaults)?;
        Ok(defaults)
    }

    pub fn set_settings(&self, settings: &PortfolioSettings) -> Result<(), AppError> {
        self.write(SETTINGS_KEY, settings)
    }

    /// Shallow-merge `update` over the current settings.
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<PortfolioSettings, AppError> {
        let mut settings = self.get_settings()?;
        settings.apply(update);
        self.set_settings(&settings)?;
        Ok(settings)
    }

    // ==================== DATA MANAGEMENT ====================

    /// Overwrite both entries with the seed data.
    pub fn reset_all_data(&self) -> Result<(), AppError> {
        self.set_projects(&sample_projects(Utc::now()))?;
        self.set_settings(&default_settings())
    }

    /// Serialize both entries as a pretty-printed snapshot.
    pub fn export_data(&self) -> Result<String, AppError> {
        let snapshot = Snapshot {
            projects: Some(self.get_projects()?),
            settings: Some(self.get_settings()?),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Apply a snapshot. Returns `Ok(false)` without touching anything when the
    /// text does not parse as a snapshot.
    pub fn import_data(&self, text: &str) -> Result<bool, AppError> {
        let snapshot: Snapshot = match serde_json::from_str(text) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Failed to import data: {}", e);
                return Ok(false);
            }
        };

        let projects = snapshot
            .projects
            .as_ref()
            .map(|p| serde_json::to_vec(p))
            .transpose()?;
        let settings = snapshot
            .settings
            .as_ref()
            .map(|s| serde_json::to_vec(s))
            .transpose()?;

        // Both entries are encoded before either is written. A storage failure
        // on the second write still leaves the first one applied.
        if let Some(bytes) = projects {
            self.storage.set(PROJECTS_KEY, &bytes)?;
        }
        if let Some(bytes) = settings {
            self.storage.set(SETTINGS_KEY, &bytes)?;
        }
        Ok(true)
    }
}
