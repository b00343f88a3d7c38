//! SQLite storage implementation for progress history.

mod model;
mod repository;

pub use model::{NewProgressDB, ProgressDB};
pub use repository::ProgressRepository;
pub(crate) use repository::insert_entry;
