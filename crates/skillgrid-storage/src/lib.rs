//! # skillgrid-storage
//!
//! SQLite persistence layer for the migration engine: connection pool,
//! create-if-absent schema bootstrap, and the query modules behind every
//! migrator. The engine is the sole writer of the target tables and only
//! ever reads the legacy ones.

pub mod engine;
pub mod pool;
pub mod queries;
pub mod schema;

pub use engine::StorageEngine;

use skillgrid_core::{SkillsError, StorageError};

/// Map a low-level SQLite failure into the storage error type.
pub(crate) fn to_storage_err(message: String) -> SkillsError {
    StorageError::SqliteError { message }.into()
}
