//! Default values shared between config structs and their `Default` impls.

pub const DEFAULT_DB_PATH: &str = "skillgrid.db";

pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Legacy rows per instance-migrator batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Caught row errors tolerated per batch before the run halts.
pub const DEFAULT_MAX_ROW_ERRORS: usize = 25;
