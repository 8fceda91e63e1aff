//! SeaORM entities backing the SQLite record store.
//!
//! These are storage rows, separate from domain models: a record row holds
//! the JSON body, and index rows map declared index values to record ids.

pub mod record;
pub mod record_index;
