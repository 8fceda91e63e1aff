//! Hotel Ops - Hotel operations core
//!
//! Rooms, reservations, payments, notifications and reports for a small
//! hotel group, persisted in a local record store (SQLite or in-memory).
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and their status machines
//! - **services**: Use cases, including the reservation lifecycle
//! - **infra**: Record store, repositories, unit of work and seeding
//! - **reports**: Occupancy, revenue and payment aggregations
//! - **types**: Shared types (the `Outcome` result shape)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Create the SQLite schema
//! cargo run -- migrate up
//!
//! # Book a room for two nights
//! cargo run -- reserve --room 101 --guest "Ana Torres" --guest-email ana@example.com \
//!     --from 2024-03-01 --to 2024-03-03
//!
//! # Occupancy for the first week of March
//! cargo run -- report occupancy --from 2024-03-01 --to 2024-03-07
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod reports;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Persistence;
pub use services::{ServiceContainer, Services};
pub use types::Outcome;
