/// Migration-engine errors.
///
/// Only `SchemaMissing` and `RowErrorBudgetExhausted` halt a run. Missing
/// parent mappings and data anomalies are per-row outcomes: the row is
/// skipped or left unmigrated and the batch carries on.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("required table missing: {table}")]
    SchemaMissing { table: String },

    #[error("no mapping for legacy skill {old_id}")]
    MissingParentMapping { old_id: i64 },

    #[error("data anomaly on legacy skill {old_id}: {reason}")]
    DataAnomaly { old_id: i64, reason: String },

    #[error("row error budget exhausted: {errors} failed rows (budget {budget})")]
    RowErrorBudgetExhausted { errors: usize, budget: usize },
}
