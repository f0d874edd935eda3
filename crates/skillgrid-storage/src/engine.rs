//! StorageEngine — owns the ConnectionPool, runs schema bootstrap on
//! startup, implements the IMigrationMap port.

use std::path::Path;

use rusqlite::Connection;

use skillgrid_core::models::MapWrite;
use skillgrid_core::traits::IMigrationMap;
use skillgrid_core::SkillsResult;

use crate::pool::ConnectionPool;
use crate::schema;

/// The storage engine. Owns the connection pool; every migrator and the
/// verifier go through it.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> SkillsResult<Self> {
        Self::open_with_pool_size(path, 4)
    }

    /// Open with an explicit read-pool size.
    pub fn open_with_pool_size(path: &Path, read_pool_size: usize) -> SkillsResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). Routes all reads
    /// through the writer since in-memory read pool connections are
    /// isolated databases that can't see the writer's changes.
    pub fn open_in_memory() -> SkillsResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run the schema bootstrap. Fatal on failure: a missing target table
    /// makes every downstream step unsafe.
    fn initialize(&self) -> SkillsResult<()> {
        self.pool.writer.with_conn_sync(schema::run_bootstrap)
    }

    /// Confirm the legacy source tables exist before a migrator reads them.
    pub fn verify_legacy_schema(&self) -> SkillsResult<()> {
        self.with_reader(schema::verify_legacy_schema)
    }

    /// Get a reference to the connection pool (for transaction-scoped
    /// operations that need the raw writer).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    pub fn with_reader<F, T>(&self, f: F) -> SkillsResult<T>
    where
        F: FnOnce(&Connection) -> SkillsResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IMigrationMap for StorageEngine {
    fn is_migrated(&self, old_id: i64) -> SkillsResult<bool> {
        self.with_reader(|conn| crate::queries::map_ops::is_migrated(conn, old_id))
    }

    fn record_mapping(&self, old_id: i64, new_id: i64) -> SkillsResult<MapWrite> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::map_ops::record_mapping(conn, old_id, new_id))
    }

    fn unmigrated_ids(&self, limit: Option<usize>) -> SkillsResult<Vec<i64>> {
        self.with_reader(|conn| crate::queries::map_ops::unmigrated_ids(conn, limit))
    }
}
