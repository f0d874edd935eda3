pub mod migration_error;
pub mod storage_error;

pub use migration_error::MigrationError;
pub use storage_error::StorageError;

/// Top-level error for the skillgrid workspace.
#[derive(Debug, thiserror::Error)]
pub enum SkillsError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SkillsResult<T> = Result<T, SkillsError>;
