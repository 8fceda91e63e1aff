//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations for the SQLite store
//! - `seed` - First-run data
//! - front desk commands (`rooms`, `reserve`, `check-in`, `pay`, `report` ...)

pub mod args;

pub use args::{Cli, Commands, DeskCommand};
