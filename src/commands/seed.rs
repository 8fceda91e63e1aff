//! Seed command - Loads first-run data into the configured store.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::seed::{self, SeedSummary};
use crate::infra::Persistence;

pub async fn execute(config: &Config) -> AppResult<SeedSummary> {
    let uow = Persistence::connect(config).await?;
    let summary = seed::run(&uow, config).await?;

    if summary.skipped {
        tracing::info!("Store already holds accounts; seeding skipped");
    }
    Ok(summary)
}
