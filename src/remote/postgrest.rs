//! PostgREST (Supabase-compatible) remote store.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{NewProjectRow, ProjectChanges, ProjectRow, RemoteStore, SettingsPayload, SettingsRow};
use crate::config::RemoteConfig;
use crate::errors::AppError;

/// Media type asking PostgREST for exactly one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Remote store speaking the PostgREST table API.
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(config: &RemoteConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &RemoteConfig) -> Self {
        Self {
            client,
            base_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Ask for the affected row back as a single object.
    fn returning_one(request: RequestBuilder) -> RequestBuilder {
        request
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
    }

    async fn send(request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_ACCEPTABLE {
            // PostgREST answers 406 when a single-object request matched no rows.
            return Err(AppError::NotFound(format!("No matching row: {}", body)));
        }
        Err(AppError::Remote(format!("Remote store returned {}: {}", status, body)))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AppError> {
        let response = Self::send(request).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Invalid remote response: {}", e)))
    }
}

#[async_trait]
impl RemoteStore for PostgrestStore {
    async fn select_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        let request = self
            .authorized(self.client.get(self.table_url("projects")))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        Self::json(request).await
    }

    async fn insert_project(&self, row: NewProjectRow) -> Result<ProjectRow, AppError> {
        let request = self.authorized(self.client.post(self.table_url("projects")));
        Self::json(Self::returning_one(request).json(&row)).await
    }

    async fn update_project(
        &self,
        id: &str,
        changes: ProjectChanges,
    ) -> Result<ProjectRow, AppError> {
        let request = self
            .authorized(self.client.patch(self.table_url("projects")))
            .query(&[("id", format!("eq.{}", id))]);
        Self::json(Self::returning_one(request).json(&changes)).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let request = self
            .authorized(self.client.delete(self.table_url("projects")))
            .query(&[("id", format!("eq.{}", id))]);
        Self::send(request).await?;
        Ok(())
    }

    async fn select_settings(&self) -> Result<Option<SettingsRow>, AppError> {
        let request = self
            .authorized(self.client.get(self.table_url("settings")))
            .query(&[("select", "*"), ("limit", "1")]);
        let rows: Vec<SettingsRow> = Self::json(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn settings_id(&self) -> Result<Option<String>, AppError> {
        #[derive(serde::Deserialize)]
        struct IdOnly {
            id: serde_json::Value,
        }

        let request = self
            .authorized(self.client.get(self.table_url("settings")))
            .query(&[("select", "id"), ("limit", "1")]);
        let rows: Vec<IdOnly> = Self::json(request).await?;
        Ok(rows.into_iter().next().map(|row| match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }))
    }

    async fn insert_settings(&self, payload: SettingsPayload) -> Result<SettingsRow, AppError> {
        let request = self.authorized(self.client.post(self.table_url("settings")));
        Self::json(Self::returning_one(request).json(&payload)).await
    }

    async fn update_settings(
        &self,
        id: &str,
        payload: SettingsPayload,
    ) -> Result<SettingsRow, AppError> {
        let request = self
            .authorized(self.client.patch(self.table_url("settings")))
            .query(&[("id", format!("eq.{}", id))]);
        Self::json(Self::returning_one(request).json(&payload)).await
    }
}
