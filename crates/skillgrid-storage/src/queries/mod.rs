//! Query modules. Every function takes `&Connection` so callers control
//! transaction boundaries; the per-row transactions live in the migrators.

pub mod dependent_ops;
pub mod instance_ops;
pub mod legacy_ops;
pub mod map_ops;
pub mod progress_ops;
pub mod template_ops;

use chrono::{DateTime, Utc};

use skillgrid_core::SkillsResult;

use crate::to_storage_err;

/// Parse an RFC3339 TEXT column written by this engine.
pub(crate) fn parse_dt(s: &str) -> SkillsResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
