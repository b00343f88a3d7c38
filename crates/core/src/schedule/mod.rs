//! Scheduling primitives shared by the completion workflow and the reminder scanner.
//!
//! - [`Periodicity`] is the cadence of a habit (daily or weekly).
//! - [`PeriodPolicy`] maps a periodicity to its tick window and thresholds.
//! - [`evaluate`] decides whether a goal is tickable at a given instant.
//! - [`Clock`] makes "now" injectable.

mod clock;
mod period_policy;
mod periodicity;
mod tickability;

pub use clock::{Clock, ManualClock, SystemClock};
pub use period_policy::PeriodPolicy;
pub use periodicity::Periodicity;
pub use tickability::{deadline, evaluate, TickEvaluation, TickReason};
