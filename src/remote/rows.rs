//! Remote (snake_case) row shapes and their mapping to application models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{
    Category, NewProject, Patch, PortfolioSettings, Project, ProjectStatus, ProjectUpdate,
    SkillGroup, SocialLink,
};

/// Remote stores may key rows by integer or text; both are carried as text.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A row of the remote `projects` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub live_demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub status: ProjectStatus,
    #[serde(default)]
    pub completed_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            long_description: row.long_description,
            category: row.category,
            tags: row.tags,
            image: row.image,
            images: None,
            live_demo_url: row.live_demo_url,
            github_url: row.github_url,
            featured: row.featured,
            status: row.status,
            completed_date: row.completed_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for `projects`. Identity and timestamps are left to the store.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProjectRow {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub category: Category,
    pub tags: Vec<String>,
    pub image: String,
    pub live_demo_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: bool,
    pub status: ProjectStatus,
    pub completed_date: Option<String>,
}

impl From<NewProject> for NewProjectRow {
    fn from(project: NewProject) -> Self {
        let project = project.normalized();
        NewProjectRow {
            title: project.title,
            description: project.description,
            long_description: project.long_description,
            category: project.category,
            tags: project.tags,
            image: project.image,
            live_demo_url: project.live_demo_url,
            github_url: project.github_url,
            featured: project.featured,
            status: project.status,
            completed_date: project.completed_date,
        }
    }
}

impl From<&Project> for NewProjectRow {
    fn from(project: &Project) -> Self {
        NewProjectRow {
            title: project.title.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone(),
            category: project.category,
            tags: project.tags.clone(),
            image: project.image.clone(),
            live_demo_url: project.live_demo_url.clone(),
            github_url: project.github_url.clone(),
            featured: project.featured,
            status: project.status,
            completed_date: project.completed_date.clone(),
        }
    }
}

/// Sparse update payload for `projects`. Only `Set` columns are sent;
/// `updated_at` is always stamped.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectChanges {
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub long_description: Patch<Option<String>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub category: Patch<Category>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub tags: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub image: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub live_demo_url: Patch<Option<String>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub github_url: Patch<Option<String>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub featured: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub status: Patch<ProjectStatus>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub completed_date: Patch<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectChanges {
    /// `images` has no remote column and is dropped.
    pub fn new(update: ProjectUpdate, updated_at: DateTime<Utc>) -> Self {
        let update = update.normalized();
        ProjectChanges {
            title: update.title,
            description: update.description,
            long_description: update.long_description,
            category: update.category,
            tags: update.tags,
            image: update.image,
            live_demo_url: update.live_demo_url,
            github_url: update.github_url,
            featured: update.featured,
            status: update.status,
            completed_date: update.completed_date,
            updated_at,
        }
    }
}

/// A row of the remote `settings` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub greetings: Option<Vec<String>>,
    #[serde(default)]
    pub about_description: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<SkillGroup>>,
    #[serde(default)]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SettingsRow> for PortfolioSettings {
    fn from(row: SettingsRow) -> Self {
        PortfolioSettings {
            name: row.name,
            title: row.title,
            bio: row.bio,
            email: row.email,
            phone: row.phone,
            location: row.location,
            github: row.github,
            linkedin: row.linkedin,
            twitter: row.twitter,
            website: row.website,
            profile_image: None,
            resume_url: None,
            greetings: row.greetings,
            about_description: row.about_description,
            skills: row.skills,
            social_links: row.social_links,
        }
    }
}

/// Full write payload for `settings`, used for both insert and update.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettingsPayload {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub greetings: Option<Vec<String>>,
    pub about_description: Option<String>,
    pub skills: Option<Vec<SkillGroup>>,
    pub social_links: Option<Vec<SocialLink>>,
    pub updated_at: DateTime<Utc>,
}

impl SettingsPayload {
    /// `profile_image` and `resume_url` have no remote column and are dropped.
    pub fn new(settings: PortfolioSettings, updated_at: DateTime<Utc>) -> Self {
        SettingsPayload {
            name: settings.name,
            title: settings.title,
            bio: settings.bio,
            email: settings.email,
            phone: settings.phone,
            location: settings.location,
            github: settings.github,
            linkedin: settings.linkedin,
            twitter: settings.twitter,
            website: settings.website,
            greetings: settings.greetings,
            about_description: settings.about_description,
            skills: settings.skills,
            social_links: settings.social_links,
            updated_at,
        }
    }
}
