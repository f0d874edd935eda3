use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skillgrid_core::models::{BatchParams, DependentKind, MigrationReport};
use skillgrid_core::SkillgridConfig;
use skillgrid_migrate::{DependentMigrator, InstanceMigrator, MigrationRunner, ProgressVerifier};
use skillgrid_storage::StorageEngine;

/// Online migration engine for the skills schema: flat `skills` rows into
/// deduplicated templates + per-user instances, dependents cascaded via
/// the migration map. Every command is idempotent and resumable.
#[derive(Parser)]
#[command(name = "skillgrid", version)]
struct Cli {
    /// Path to the SQLite database (overrides the config file).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the target tables if absent. Safe to repeat.
    Bootstrap,
    /// Migrate one batch of legacy skills into templates + instances.
    Skills {
        #[arg(long)]
        batch_size: Option<usize>,
        /// Advisory start offset; resumption never depends on it.
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Migrate endorsements whose parent skills are already mapped.
    Endorsements {
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Migrate skill histories whose parent skills are already mapped.
    Histories {
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Print the reconciliation report.
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Drive the full migration to exhaustion.
    Run,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => SkillgridConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SkillgridConfig::default(),
    };
    if let Some(db) = cli.db {
        config.storage.db_path = db;
    }

    let engine = StorageEngine::open_with_pool_size(
        &config.storage.db_path,
        config.storage.read_pool_size,
    )
    .with_context(|| format!("opening database {}", config.storage.db_path.display()))?;

    let batch_size = |override_: Option<usize>| {
        override_.unwrap_or_else(|| config.migration.effective_batch_size())
    };

    match cli.command {
        Commands::Bootstrap => {
            // Bootstrap already ran when the engine opened; this command
            // exists so operators can run it explicitly before anything else.
            println!("schema bootstrap complete: {}", config.storage.db_path.display());
        }
        Commands::Skills { batch_size: bs, offset } => {
            engine.verify_legacy_schema().context("legacy schema check")?;
            let outcome = InstanceMigrator::migrate_batch(
                &engine,
                &BatchParams {
                    batch_size: batch_size(bs),
                    offset,
                    max_row_errors: config.migration.max_row_errors,
                },
            )?;
            println!(
                "processed {} | created {} | skipped existing {} | anomalies {} | row errors {}",
                outcome.processed,
                outcome.created,
                outcome.skipped_existing,
                outcome.anomalies,
                outcome.row_errors
            );
        }
        Commands::Endorsements { batch_size: bs } => {
            engine.verify_legacy_schema().context("legacy schema check")?;
            let outcome =
                DependentMigrator::migrate(&engine, DependentKind::Endorsements, batch_size(bs))?;
            println!(
                "migrated {} | skipped unmapped {} | row errors {}",
                outcome.migrated, outcome.skipped_unmapped, outcome.row_errors
            );
        }
        Commands::Histories { batch_size: bs } => {
            engine.verify_legacy_schema().context("legacy schema check")?;
            let outcome =
                DependentMigrator::migrate(&engine, DependentKind::Histories, batch_size(bs))?;
            println!(
                "migrated {} | skipped unmapped {} | row errors {}",
                outcome.migrated, outcome.skipped_unmapped, outcome.row_errors
            );
        }
        Commands::Status { json } => {
            engine.verify_legacy_schema().context("legacy schema check")?;
            let report = ProgressVerifier::report(&engine)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Run => {
            let summary = MigrationRunner::run_to_exhaustion(&engine, &config.migration)?;
            println!(
                "batches {} | created {} | reused {} | anomalies {} | endorsements {} | histories {} | complete: {}",
                summary.instance_batches,
                summary.instances_created,
                summary.instances_reused,
                summary.anomalies,
                summary.endorsements_migrated,
                summary.histories_migrated,
                summary.complete
            );
        }
    }

    Ok(())
}

fn print_report(report: &MigrationReport) {
    println!(
        "skills: {}/{} mapped ({:.1}%), {} remaining",
        report.skills.mapped,
        report.skills.total,
        report.skills.completion_pct,
        report.skills.remaining
    );
    for dep in &report.dependents {
        println!(
            "{}: {}/{} migrated, {} remaining",
            dep.kind, dep.migrated, dep.total, dep.remaining
        );
    }
    println!(
        "migration {}",
        if report.is_complete() { "complete" } else { "in progress" }
    );
}
