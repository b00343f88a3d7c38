use chrono::Duration;

use super::Periodicity;

/// Tick window and thresholds for a periodicity.
///
/// A completion less than one window after the previous one is too early.
/// Past twice the window the goal has lapsed.
pub struct PeriodPolicy;

impl PeriodPolicy {
    pub fn window_for(periodicity: Periodicity) -> Duration {
        match periodicity {
            Periodicity::Daily => Duration::hours(24),
            Periodicity::Weekly => Duration::days(7),
        }
    }

    pub fn early_threshold(periodicity: Periodicity) -> Duration {
        Self::window_for(periodicity)
    }

    pub fn expiry_threshold(periodicity: Periodicity) -> Duration {
        Self::window_for(periodicity) * 2
    }
}
