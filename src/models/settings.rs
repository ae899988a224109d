//! Portfolio settings model matching the frontend PortfolioSettings interface.

use serde::{Deserialize, Serialize};

use super::Patch;
use crate::errors::AppError;

/// A titled group of skills shown on the portfolio page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillGroup {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A link to one of the owner's social profiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Singleton record describing the portfolio owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSettings {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greetings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
}

impl PortfolioSettings {
    /// Check the required identity fields.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("name", &self.name),
            ("title", &self.title),
            ("bio", &self.bio),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }

    /// Shallow merge of a sparse update.
    pub fn apply(&mut self, update: SettingsUpdate) {
        update.name.apply_to(&mut self.name);
        update.title.apply_to(&mut self.title);
        update.bio.apply_to(&mut self.bio);
        update.email.apply_to(&mut self.email);
        update.phone.apply_to(&mut self.phone);
        update.location.apply_to(&mut self.location);
        update.github.apply_to(&mut self.github);
        update.linkedin.apply_to(&mut self.linkedin);
        update.twitter.apply_to(&mut self.twitter);
        update.website.apply_to(&mut self.website);
        update.profile_image.apply_to(&mut self.profile_image);
        update.resume_url.apply_to(&mut self.resume_url);
        update.greetings.apply_to(&mut self.greetings);
        update.about_description.apply_to(&mut self.about_description);
        update.skills.apply_to(&mut self.skills);
        update.social_links.apply_to(&mut self.social_links);
    }
}

/// Sparse settings update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub bio: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub phone: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub location: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub github: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub linkedin: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub twitter: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub website: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub profile_image: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub resume_url: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub greetings: Patch<Option<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub about_description: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub skills: Patch<Option<Vec<SkillGroup>>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub social_links: Patch<Option<Vec<SocialLink>>>,
}
