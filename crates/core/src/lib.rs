//! Habitual Core - Domain entities, services, and traits.
//!
//! This crate contains the goal scheduling and notification logic for
//! Habitual. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod events;
pub mod goals;
pub mod habits;
pub mod notifications;
pub mod progress;
pub mod reminders;
pub mod schedule;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
