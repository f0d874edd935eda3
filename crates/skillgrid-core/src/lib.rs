//! # skillgrid-core
//!
//! Foundation crate for the skillgrid migration engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SkillgridConfig;
pub use errors::{MigrationError, SkillsError, SkillsResult, StorageError};
pub use models::{
    BatchOutcome, DependentKind, LegacySkill, MapWrite, MigrationMapEntry, MigrationReport,
    SkillTemplate, TemplateKey, UserSkillInstance,
};
