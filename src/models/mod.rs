//! Data models for the portfolio backend.
//!
//! Wire formats are camelCase to match the portfolio frontend.

mod patch;
mod project;
mod settings;
mod snapshot;

pub use patch::*;
pub use project::*;
pub use settings::*;
pub use snapshot::*;
