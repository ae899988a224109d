//! SQLite-backed remote store.
//!
//! Holds the `projects` and `settings` tables in the remote column layout.
//! Array and structured columns are stored as JSON text.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};

use super::{NewProjectRow, ProjectChanges, ProjectRow, RemoteStore, SettingsPayload, SettingsRow};
use crate::errors::AppError;
use crate::models::{Category, Patch, ProjectStatus};

const PROJECT_COLUMNS: &str = "id, title, description, long_description, category, tags, image, \
     live_demo_url, github_url, featured, status, completed_date, created_at, updated_at";

const SETTINGS_COLUMNS: &str = "id, name, title, bio, email, phone, location, github, linkedin, \
     twitter, website, greetings, about_description, skills, social_links, updated_at";

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            long_description TEXT,
            category TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            image TEXT NOT NULL,
            live_demo_url TEXT,
            github_url TEXT,
            featured INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL,
            completed_date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            title TEXT NOT NULL,
            bio TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            location TEXT,
            github TEXT,
            linkedin TEXT,
            twitter TEXT,
            website TEXT,
            greetings TEXT,
            about_description TEXT,
            skills TEXT,
            social_links TEXT,
            updated_at TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_projects_created_at ON projects(created_at);")
        .execute(pool)
        .await?;

    Ok(())
}

/// Remote store over a local SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_project(&self, id: &str) -> Result<Option<ProjectRow>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(project_from_row).transpose()
    }

    async fn get_settings(&self, id: &str) -> Result<Option<SettingsRow>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM settings WHERE id = ?",
            SETTINGS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(settings_from_row).transpose()
    }
}

#[async_trait]
impl RemoteStore for SqliteStore {
    async fn select_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM projects ORDER BY created_at DESC",
            PROJECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(project_from_row).collect()
    }

    async fn insert_project(&self, row: NewProjectRow) -> Result<ProjectRow, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = format_timestamp(Utc::now());

        sqlx::query(
            r#"INSERT INTO projects (
                id, title, description, long_description, category, tags, image,
                live_demo_url, github_url, featured, status, completed_date,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.long_description)
        .bind(row.category.as_str())
        .bind(to_json(&row.tags)?)
        .bind(&row.image)
        .bind(&row.live_demo_url)
        .bind(&row.github_url)
        .bind(row.featured as i32)
        .bind(row.status.as_str())
        .bind(&row.completed_date)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_project(&id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Inserted project {} not readable", id)))
    }

    async fn update_project(
        &self,
        id: &str,
        changes: ProjectChanges,
    ) -> Result<ProjectRow, AppError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE projects SET updated_at = ");
        builder.push_bind(format_timestamp(changes.updated_at));

        if let Patch::Set(title) = changes.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Patch::Set(description) = changes.description {
            builder.push(", description = ").push_bind(description);
        }
        if let Patch::Set(long_description) = changes.long_description {
            builder.push(", long_description = ").push_bind(long_description);
        }
        if let Patch::Set(category) = changes.category {
            builder.push(", category = ").push_bind(category.as_str());
        }
        if let Patch::Set(tags) = changes.tags {
            builder.push(", tags = ").push_bind(to_json(&tags)?);
        }
        if let Patch::Set(image) = changes.image {
            builder.push(", image = ").push_bind(image);
        }
        if let Patch::Set(live_demo_url) = changes.live_demo_url {
            builder.push(", live_demo_url = ").push_bind(live_demo_url);
        }
        if let Patch::Set(github_url) = changes.github_url {
            builder.push(", github_url = ").push_bind(github_url);
        }
        if let Patch::Set(featured) = changes.featured {
            builder.push(", featured = ").push_bind(featured as i32);
        }
        if let Patch::Set(status) = changes.status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Patch::Set(completed_date) = changes.completed_date {
            builder.push(", completed_date = ").push_bind(completed_date);
        }

        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }

        self.get_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn select_settings(&self) -> Result<Option<SettingsRow>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM settings LIMIT 1", SETTINGS_COLUMNS))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(settings_from_row).transpose()
    }

    async fn settings_id(&self) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT id FROM settings LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("id")))
    }

    async fn insert_settings(&self, payload: SettingsPayload) -> Result<SettingsRow, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            r#"INSERT INTO settings (
                id, name, title, bio, email, phone, location, github, linkedin,
                twitter, website, greetings, about_description, skills, social_links,
                updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&payload.name)
        .bind(&payload.title)
        .bind(&payload.bio)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.location)
        .bind(&payload.github)
        .bind(&payload.linkedin)
        .bind(&payload.twitter)
        .bind(&payload.website)
        .bind(to_json_opt(&payload.greetings)?)
        .bind(&payload.about_description)
        .bind(to_json_opt(&payload.skills)?)
        .bind(to_json_opt(&payload.social_links)?)
        .bind(format_timestamp(payload.updated_at))
        .execute(&self.pool)
        .await?;

        self.get_settings(&id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Inserted settings {} not readable", id)))
    }

    async fn update_settings(
        &self,
        id: &str,
        payload: SettingsPayload,
    ) -> Result<SettingsRow, AppError> {
        let result = sqlx::query(
            r#"UPDATE settings SET
                name = ?, title = ?, bio = ?, email = ?, phone = ?, location = ?,
                github = ?, linkedin = ?, twitter = ?, website = ?, greetings = ?,
                about_description = ?, skills = ?, social_links = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&payload.name)
        .bind(&payload.title)
        .bind(&payload.bio)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.location)
        .bind(&payload.github)
        .bind(&payload.linkedin)
        .bind(&payload.twitter)
        .bind(&payload.website)
        .bind(to_json_opt(&payload.greetings)?)
        .bind(&payload.about_description)
        .bind(to_json_opt(&payload.skills)?)
        .bind(to_json_opt(&payload.social_links)?)
        .bind(format_timestamp(payload.updated_at))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Settings {} not found", id)));
        }

        self.get_settings(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Settings {} not found", id)))
    }
}

// Helper functions for row conversion

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: &str, s: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::Remote(format!("Invalid {} timestamp {:?}: {}", column, s, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(format!("JSON error: {}", e)))
}

fn to_json_opt<T: Serialize>(value: &Option<T>) -> Result<Option<String>, AppError> {
    value.as_ref().map(to_json).transpose()
}

fn from_json<T: DeserializeOwned>(column: &str, s: Option<String>) -> Result<Option<T>, AppError> {
    s.map(|s| {
        serde_json::from_str(&s)
            .map_err(|e| AppError::Remote(format!("Invalid {} column: {}", column, e)))
    })
    .transpose()
}

fn project_from_row(row: &SqliteRow) -> Result<ProjectRow, AppError> {
    let category: String = row.get("category");
    let status: String = row.get("status");
    let featured: i32 = row.get("featured");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(ProjectRow {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        long_description: row.get("long_description"),
        category: Category::parse(&category)
            .ok_or_else(|| AppError::Remote(format!("Unknown category {:?}", category)))?,
        tags: from_json("tags", row.get("tags"))?.unwrap_or_default(),
        image: row.get("image"),
        live_demo_url: row.get("live_demo_url"),
        github_url: row.get("github_url"),
        featured: featured != 0,
        status: ProjectStatus::parse(&status)
            .ok_or_else(|| AppError::Remote(format!("Unknown status {:?}", status)))?,
        completed_date: row.get("completed_date"),
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}

fn settings_from_row(row: &SqliteRow) -> Result<SettingsRow, AppError> {
    let updated_at: Option<String> = row.get("updated_at");

    Ok(SettingsRow {
        id: row.get("id"),
        name: row.get("name"),
        title: row.get("title"),
        bio: row.get("bio"),
        email: row.get("email"),
        phone: row.get("phone"),
        location: row.get("location"),
        github: row.get("github"),
        linkedin: row.get("linkedin"),
        twitter: row.get("twitter"),
        website: row.get("website"),
        greetings: from_json("greetings", row.get("greetings"))?,
        about_description: row.get("about_description"),
        skills: from_json("skills", row.get("skills"))?,
        social_links: from_json("social_links", row.get("social_links"))?,
        updated_at: updated_at
            .map(|s| parse_timestamp("updated_at", &s))
            .transpose()?,
    })
}
