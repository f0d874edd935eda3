//! # skillgrid-migrate
//!
//! The online schema-migration engine: resolves legacy rows into
//! deduplicated templates and per-user instances, cascades dependent
//! records through the migration map, and reconciles progress.
//!
//! Everything here is idempotent and resumable: the data itself (the
//! migration map, the dedup anti-joins) is the only cursor. A run can be
//! stopped between rows or batches with no corruption.

pub mod dependents;
pub mod instance;
pub mod resolver;
pub mod runner;
pub mod verifier;

pub use dependents::DependentMigrator;
pub use instance::InstanceMigrator;
pub use resolver::TemplateResolver;
pub use runner::MigrationRunner;
pub use verifier::ProgressVerifier;

use skillgrid_core::{SkillsError, StorageError};

/// Map a transaction-control failure into the storage error type.
pub(crate) fn store_err(message: String) -> SkillsError {
    StorageError::SqliteError { message }.into()
}
