/// Skillgrid engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard ceiling on batch size. Batches are independent units of progress;
/// anything larger just holds the writer longer without adding safety.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Legacy tables the engine reads. Never created, written, or dropped here.
pub const LEGACY_TABLES: &[&str] = &["skills", "endorsements", "skill_histories"];
