use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{PeriodPolicy, Periodicity};

/// Why a goal is (or is not) tickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickReason {
    NeverTicked,
    TooEarly,
    WithinWindow,
    Expired,
}

/// Result of evaluating a goal against its period policy. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickEvaluation {
    pub is_tickable: bool,
    pub reason: TickReason,
    /// Absolute time since the last completion, if there was one.
    #[serde(skip)]
    pub elapsed: Option<Duration>,
}

impl TickEvaluation {
    /// Time left before a too-early goal becomes tickable. Zero otherwise.
    pub fn wait_remaining(&self, periodicity: Periodicity) -> Duration {
        match (self.reason, self.elapsed) {
            (TickReason::TooEarly, Some(elapsed)) => {
                PeriodPolicy::early_threshold(periodicity) - elapsed
            }
            _ => Duration::zero(),
        }
    }
}

/// Decides whether `now` falls in the tick window following `last_occurrence`.
///
/// The elapsed time is taken as an absolute value, so a `last_occurrence` in the
/// future is treated the same as one equally far in the past.
pub fn evaluate(
    periodicity: Periodicity,
    last_occurrence: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TickEvaluation {
    let Some(last) = last_occurrence else {
        return TickEvaluation {
            is_tickable: true,
            reason: TickReason::NeverTicked,
            elapsed: None,
        };
    };

    let diff = now - last;
    let elapsed = if diff < Duration::zero() { -diff } else { diff };
    let reason = if elapsed < PeriodPolicy::early_threshold(periodicity) {
        TickReason::TooEarly
    } else if elapsed <= PeriodPolicy::expiry_threshold(periodicity) {
        TickReason::WithinWindow
    } else {
        TickReason::Expired
    };

    TickEvaluation {
        is_tickable: reason == TickReason::WithinWindow,
        reason,
        elapsed: Some(elapsed),
    }
}

/// Last instant at which a goal completed at `last_occurrence` can still be ticked.
pub fn deadline(periodicity: Periodicity, last_occurrence: DateTime<Utc>) -> DateTime<Utc> {
    last_occurrence + PeriodPolicy::expiry_threshold(periodicity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 19, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_never_ticked_is_tickable() {
        let result = evaluate(Periodicity::Daily, None, base());
        assert!(result.is_tickable);
        assert_eq!(result.reason, TickReason::NeverTicked);
        assert_eq!(result.elapsed, None);
    }

    #[test]
    fn test_daily_boundaries() {
        let last = base();
        let too_early = evaluate(
            Periodicity::Daily,
            Some(last),
            last + Duration::hours(23) + Duration::minutes(59),
        );
        assert_eq!(too_early.reason, TickReason::TooEarly);
        assert!(!too_early.is_tickable);

        let opens = evaluate(Periodicity::Daily, Some(last), last + Duration::hours(24));
        assert_eq!(opens.reason, TickReason::WithinWindow);
        assert!(opens.is_tickable);

        let closes = evaluate(Periodicity::Daily, Some(last), last + Duration::hours(48));
        assert_eq!(closes.reason, TickReason::WithinWindow);

        let expired = evaluate(
            Periodicity::Daily,
            Some(last),
            last + Duration::hours(48) + Duration::seconds(1),
        );
        assert_eq!(expired.reason, TickReason::Expired);
        assert!(!expired.is_tickable);
    }

    #[test]
    fn test_weekly_boundaries() {
        let last = base();
        let six_days = evaluate(Periodicity::Weekly, Some(last), last + Duration::days(6));
        assert_eq!(six_days.reason, TickReason::TooEarly);

        let ten_days = evaluate(Periodicity::Weekly, Some(last), last + Duration::days(10));
        assert_eq!(ten_days.reason, TickReason::WithinWindow);

        let fifteen_days = evaluate(Periodicity::Weekly, Some(last), last + Duration::days(15));
        assert_eq!(fifteen_days.reason, TickReason::Expired);
    }

    #[test]
    fn test_future_last_occurrence_uses_absolute_difference() {
        // A last occurrence 30 hours in the future evaluates like one 30 hours ago.
        // This hides data-entry mistakes but tolerates clock skew.
        let now = base();
        let future = now + Duration::hours(30);
        let result = evaluate(Periodicity::Daily, Some(future), now);
        assert_eq!(result.reason, TickReason::WithinWindow);
        assert!(result.is_tickable);
    }

    #[test]
    fn test_wait_remaining() {
        let last = base();
        let result = evaluate(Periodicity::Daily, Some(last), last + Duration::hours(20));
        assert_eq!(result.wait_remaining(Periodicity::Daily), Duration::hours(4));

        let tickable = evaluate(Periodicity::Daily, Some(last), last + Duration::hours(30));
        assert_eq!(tickable.wait_remaining(Periodicity::Daily), Duration::zero());
    }

    #[test]
    fn test_deadline() {
        let last = base();
        assert_eq!(deadline(Periodicity::Daily, last), last + Duration::hours(48));
        assert_eq!(deadline(Periodicity::Weekly, last), last + Duration::days(14));
    }
}
