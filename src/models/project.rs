//! Project model matching the frontend Project interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Patch;
use crate::errors::AppError;

/// Portfolio category of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile App")]
    MobileApp,
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::MobileApp => "Mobile App",
            Category::UiUxDesign => "UI/UX Design",
            Category::DataScience => "Data Science",
            Category::MachineLearning => "Machine Learning",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Web Development" => Some(Category::WebDevelopment),
            "Mobile App" => Some(Category::MobileApp),
            "UI/UX Design" => Some(Category::UiUxDesign),
            "Data Science" => Some(Category::DataScience),
            "Machine Learning" => Some(Category::MachineLearning),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Archived => "Archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "In Progress" => Some(ProjectStatus::InProgress),
            "Completed" => Some(ProjectStatus::Completed),
            "On Hold" => Some(ProjectStatus::OnHold),
            "Archived" => Some(ProjectStatus::Archived),
            _ => None,
        }
    }
}

/// A portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub live_demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub status: ProjectStatus,
    #[serde(default)]
    pub completed_date: Option<String>,
}

impl NewProject {
    /// Check the required form fields.
    pub fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("image", &self.image)
    }

    /// Remove duplicate and blank tags, keeping first occurrences in order.
    pub fn normalized(mut self) -> Self {
        self.tags = normalize_tags(self.tags);
        self
    }

    /// Build the stored record for a freshly assigned identity.
    pub fn into_project(self, id: String, now: DateTime<Utc>) -> Project {
        let new = self.normalized();
        Project {
            id,
            title: new.title,
            description: new.description,
            long_description: new.long_description,
            category: new.category,
            tags: new.tags,
            image: new.image,
            images: new.images,
            live_demo_url: new.live_demo_url,
            github_url: new.github_url,
            featured: new.featured,
            status: new.status,
            completed_date: new.completed_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for a sparse project update.
///
/// Identity and creation time cannot be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub long_description: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub category: Patch<Category>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub tags: Patch<Vec<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub image: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub images: Patch<Option<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub live_demo_url: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub github_url: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub featured: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub status: Patch<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub completed_date: Patch<Option<String>>,
}

impl ProjectUpdate {
    /// Reject updates that would blank a required field.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Patch::Set(title) = &self.title {
            require("title", title)?;
        }
        if let Patch::Set(description) = &self.description {
            require("description", description)?;
        }
        if let Patch::Set(image) = &self.image {
            require("image", image)?;
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.tags = self.tags.map(normalize_tags);
        self
    }
}

impl Project {
    /// Merge an update over this record. Identity and creation time are kept,
    /// `updated_at` is set to `now`.
    pub fn apply(&mut self, update: ProjectUpdate, now: DateTime<Utc>) {
        let update = update.normalized();
        update.title.apply_to(&mut self.title);
        update.description.apply_to(&mut self.description);
        update.long_description.apply_to(&mut self.long_description);
        update.category.apply_to(&mut self.category);
        update.tags.apply_to(&mut self.tags);
        update.image.apply_to(&mut self.image);
        update.images.apply_to(&mut self.images);
        update.live_demo_url.apply_to(&mut self.live_demo_url);
        update.github_url.apply_to(&mut self.github_url);
        update.featured.apply_to(&mut self.featured);
        update.status.apply_to(&mut self.status);
        update.completed_date.apply_to(&mut self.completed_date);
        self.updated_at = now;
    }
}

/// Optional filters for project listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.featured.map_or(true, |f| project.featured == f)
            && self.category.map_or(true, |c| project.category == c)
            && self.status.map_or(true, |s| project.status == s)
    }
}

/// Timestamp for a mutation that must sort strictly after `previous`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

/// Trim tags, drop blanks and duplicates, keep first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
