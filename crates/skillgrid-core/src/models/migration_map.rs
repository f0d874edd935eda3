use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the durable old-id → new-id ledger.
///
/// `old_skill_id` is unique: a legacy row is never mapped twice. The same
/// `new_user_skill_id` may appear under several old ids when two legacy
/// rows collapse onto one (user, template) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationMapEntry {
    pub old_skill_id: i64,
    pub new_user_skill_id: i64,
    pub migrated_at: DateTime<Utc>,
}

/// Result of a ledger write. A duplicate old id is success, not an error;
/// this is what makes re-running a batch idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapWrite {
    Inserted,
    AlreadyMapped,
}
