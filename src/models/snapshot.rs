//! Export/import snapshot of the local store.

use serde::{Deserialize, Serialize};

use super::{PortfolioSettings, Project};

/// Whole-store snapshot. Both parts are optional on import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PortfolioSettings>,
}
