//! Progress history: one immutable entry per completion.

mod progress_model;
mod progress_traits;

pub use progress_model::{NewProgressEntry, ProgressEntry, ProgressSnapshot};
pub use progress_traits::ProgressRepositoryTrait;
