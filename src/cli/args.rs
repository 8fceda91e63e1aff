//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::domain::RoomStatus;

/// Hotel operations console: rooms, reservations, payments and reports
#[derive(Parser, Debug)]
#[command(name = "hotel-ops")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use a throwaway in-memory store (seeded on start)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Account to sign in with (defaults to the seeded administrator)
    #[arg(long, global = true, env = "HOTEL_OPS_EMAIL")]
    pub email: Option<String>,

    #[arg(long, global = true, env = "HOTEL_OPS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Hotel to work on, by id or name (defaults to the first one visible)
    #[arg(long, global = true, env = "HOTEL_OPS_HOTEL")]
    pub hotel: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Load the default hotels, accounts and sample bookings
    Seed,

    #[command(flatten)]
    Desk(DeskCommand),
}

/// Commands run by a signed-in user against the selected hotel
#[derive(Subcommand, Debug)]
pub enum DeskCommand {
    /// List the hotels you can work on
    Hotels,

    /// Show the room board
    Rooms,

    /// Rooms free for a stay
    Available(StayArgs),

    /// Book a room
    Reserve(ReserveArgs),

    /// Check a guest in
    CheckIn(ReservationArg),

    /// Check a guest out (requires payment)
    CheckOut(ReservationArg),

    /// Record a payment, settling the reservation
    Pay(PayArgs),

    /// Cancel a confirmed reservation
    Cancel(ReservationArg),

    /// Move a reservation's check-out date
    Extend(ExtendArgs),

    /// Move a reservation to another room
    Move(MoveArgs),

    /// Change a room's housekeeping status
    RoomStatus(RoomStatusArgs),

    /// Occupancy, revenue and payment reports
    Report(ReportArgs),

    /// Your notifications
    Notifications(NotificationArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[derive(Args, Debug)]
pub struct StayArgs {
    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Args, Debug)]
pub struct ReserveArgs {
    /// Room number
    #[arg(long)]
    pub room: String,

    #[arg(long)]
    pub guest: String,

    #[arg(long)]
    pub guest_email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    #[command(flatten)]
    pub stay: StayArgs,

    /// Agreed total instead of nights x nightly price
    #[arg(long)]
    pub total: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ReservationArg {
    pub reservation: Uuid,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    pub reservation: Uuid,

    #[arg(long)]
    pub amount: f64,

    /// Payment method, e.g. cash or card
    #[arg(long)]
    pub method: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExtendArgs {
    pub reservation: Uuid,

    /// New departure date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    pub reservation: Uuid,

    /// Target room number in the same hotel
    #[arg(long)]
    pub room: String,
}

#[derive(Args, Debug)]
pub struct RoomStatusArgs {
    /// Room number
    pub room: String,

    /// available, occupied, dirty or maintenance
    pub status: RoomStatus,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub kind: ReportKind,
}

#[derive(Subcommand, Debug)]
pub enum ReportKind {
    /// Room-night occupancy over a date range
    Occupancy(WindowArgs),
    /// Revenue by payment status
    Revenue(WindowArgs),
    /// Per-room performance ranking
    Rooms(WindowArgs),
    /// Collected payments by method and day
    Payments(WindowArgs),
    /// Today's dashboard figures
    Stats,
}

#[derive(Args, Debug)]
pub struct WindowArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Args, Debug)]
pub struct NotificationArgs {
    /// Mark every notification read
    #[arg(long, conflicts_with = "reminders")]
    pub mark_read: bool,

    /// Create reminders for tomorrow's arrivals
    #[arg(long)]
    pub reminders: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reserve() {
        let cli = Cli::try_parse_from([
            "hotel-ops",
            "--ephemeral",
            "reserve",
            "--room",
            "101",
            "--guest",
            "Ana Torres",
            "--guest-email",
            "ana@example.com",
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-03",
        ])
        .unwrap();

        assert!(cli.ephemeral);
        match cli.command {
            Commands::Desk(DeskCommand::Reserve(args)) => {
                assert_eq!(args.room, "101");
                assert_eq!(args.guests, 1);
                assert_eq!(args.stay.to, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_room_status() {
        let cli = Cli::try_parse_from(["hotel-ops", "room-status", "101", "dirty"]).unwrap();

        match cli.command {
            Commands::Desk(DeskCommand::RoomStatus(args)) => {
                assert_eq!(args.status, RoomStatus::Dirty)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_room_status() {
        let result = Cli::try_parse_from(["hotel-ops", "room-status", "101", "closed"]);
        assert!(result.is_err());
    }
}
