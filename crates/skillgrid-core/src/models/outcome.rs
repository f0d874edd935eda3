use serde::{Deserialize, Serialize};

/// Parameters for one instance-migrator invocation.
///
/// `offset` is advisory only, used to skip known-problematic ranges. What
/// remains is always recomputed from the anti-join against the migration
/// map, never from a stored cursor.
#[derive(Debug, Clone, Copy)]
pub struct BatchParams {
    pub batch_size: usize,
    pub offset: usize,
    /// Per-batch ceiling on caught row errors before the batch aborts.
    pub max_row_errors: usize,
}

/// Summary of one instance-migrator batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Legacy rows examined in this batch.
    pub processed: usize,
    /// New instances created.
    pub created: usize,
    /// Rows mapped onto an already-existing (user, template) instance.
    pub skipped_existing: usize,
    /// Rows left permanently unmigrated (blank name, bad user id, ...).
    pub anomalies: usize,
    /// Rows whose transaction failed and rolled back; retried next pass.
    pub row_errors: usize,
}

impl BatchOutcome {
    /// True when the anti-join returned nothing: no unmapped rows remain
    /// in the scanned window.
    pub fn exhausted(&self) -> bool {
        self.processed == 0
    }
}

/// Summary of one dependent-migrator batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DependentOutcome {
    /// Dependent rows copied into the v2 table.
    pub migrated: usize,
    /// Legacy dependents whose parent had no map entry at batch start;
    /// retried on a later invocation, never an error.
    pub skipped_unmapped: usize,
    /// Rows whose transaction failed and rolled back; retried next pass.
    pub row_errors: usize,
}

/// Aggregate summary of a full run-to-exhaustion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub instance_batches: usize,
    pub instances_created: usize,
    pub instances_reused: usize,
    pub anomalies: usize,
    pub endorsements_migrated: usize,
    pub histories_migrated: usize,
    /// True when the verifier reports remaining == 0 for skills and every
    /// dependent kind.
    pub complete: bool,
}
