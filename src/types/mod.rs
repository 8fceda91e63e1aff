//! Shared types.

mod outcome;

pub use outcome::Outcome;
