//! Commands module - CLI command implementations.
//!
//! Every command prints an `Outcome` as JSON on stdout; the returned flag
//! tells the binary whether the command succeeded.

pub mod desk;
pub mod migrate;
pub mod notifications;
pub mod report;
pub mod seed;
pub mod session;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::types::Outcome;

pub use session::Session;

/// Dispatch a parsed command line
pub async fn run(cli: Cli, config: Config) -> AppResult<bool> {
    let config = if cli.ephemeral { config.ephemeral() } else { config };

    match cli.command {
        Commands::Migrate(args) => emit(migrate::execute(args, &config).await),
        Commands::Seed => emit(seed::execute(&config).await),
        Commands::Desk(command) => {
            let session = match Session::open(
                cli.email.as_deref(),
                cli.password.as_deref(),
                cli.hotel.clone(),
                &config,
            )
            .await
            {
                Ok(session) => session,
                Err(error) => return emit::<()>(Err(error)),
            };
            desk::execute(&session, command).await
        }
    }
}

/// Print a result as an `Outcome` and report whether it succeeded
pub(crate) fn emit<T: Serialize>(result: AppResult<T>) -> AppResult<bool> {
    let outcome = Outcome::from(result);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(outcome.is_success())
}

/// The instant a date-only stay boundary stands for
pub(crate) fn at_hour(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(time))
}
