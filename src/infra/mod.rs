//! Infrastructure layer - Storage and repositories
//!
//! This module handles all persistence concerns:
//! - The record store contract and its memory and SQLite backends
//! - Database connection and migrations for the SQLite backend
//! - Typed repositories per entity
//! - Unit of Work with atomic multi-entity commits
//! - First-run seed data

pub mod db;
pub mod repositories;
pub mod seed;
pub mod store;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CrudRepository, DeleteRepository, HotelRepository, NotificationRepository, PaymentRepository,
    ReadRepository, Record, ReservationRepository, RoomRepository, UserRepository,
    WriteRepository,
};
pub use store::{MemoryStore, RecordStore, SqlStore, WriteBatch};
pub use unit_of_work::{Changeset, Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockRecordStore;
