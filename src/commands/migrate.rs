//! Migrate command - Database migration management.

use serde::Serialize;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::{Config, StoreBackend};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

#[derive(Debug, Serialize)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: &Config) -> AppResult<Vec<MigrationState>> {
    if config.store_backend != StoreBackend::Sqlite {
        return Err(AppError::validation(
            "Migrations only apply to the sqlite store",
        ));
    }

    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await?;
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
        }
        MigrateAction::Status => {}
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await?;
        }
    }

    let status = db
        .migration_status()
        .await?
        .into_iter()
        .map(|(name, applied)| MigrationState { name, applied })
        .collect();
    Ok(status)
}
