use crate::errors::SkillsResult;
use crate::models::MapWrite;

/// Port over the migration-map ledger — the single source of truth for
/// "has this legacy row been migrated".
///
/// Migrators depend on this interface, not on the store directly.
pub trait IMigrationMap: Send + Sync {
    /// Whether a ledger entry exists for the legacy id.
    fn is_migrated(&self, old_id: i64) -> SkillsResult<bool>;

    /// Append an entry. A duplicate `old_id` reports `AlreadyMapped` and
    /// leaves the ledger unchanged.
    fn record_mapping(&self, old_id: i64, new_id: i64) -> SkillsResult<MapWrite>;

    /// Legacy skill ids with no ledger entry, ascending, up to `limit`
    /// (all of them when `None`). The anti-join behind resumption.
    fn unmigrated_ids(&self, limit: Option<usize>) -> SkillsResult<Vec<i64>>;
}
