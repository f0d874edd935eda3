//! The single write connection, serialized behind a mutex. All mutation in
//! the engine is append/insert-only and flows through here.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use skillgrid_core::{SkillsError, SkillsResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// The writer. One per engine; batches never overlap.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> SkillsResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> SkillsResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> SkillsResult<T>
    where
        F: FnOnce(&Connection) -> SkillsResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            SkillsError::from(StorageError::LockPoisoned {
                message: e.to_string(),
            })
        })?;
        f(&guard)
    }
}
