use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::progress::ProgressSnapshot;
use crate::schedule::{deadline, Periodicity, TickEvaluation, TickReason};

const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Period-specific wording for goal messages.
///
/// `on_completion_message` only speaks when the streak is non-zero and
/// `on_expired_message` only when it is zero, so at most one of them produces
/// a message for a given state.
pub trait NotificationStrategy: Send + Sync {
    fn on_completion_message(&self, snapshot: &ProgressSnapshot) -> Option<String>;

    fn on_expired_message(&self, snapshot: &ProgressSnapshot) -> Option<String>;

    /// Message for a goal that is waiting to be ticked.
    fn reminder_message(
        &self,
        snapshot: &ProgressSnapshot,
        evaluation: &TickEvaluation,
    ) -> Option<String>;
}

fn target_suffix(snapshot: &ProgressSnapshot) -> String {
    if snapshot.target_reached() {
        format!(" Target of {} reached!", snapshot.target_value)
    } else {
        format!(" {} to go.", snapshot.distance_from_target)
    }
}

fn never_ticked_message(snapshot: &ProgressSnapshot) -> String {
    format!(
        "'{}' was never ticked, you are free to tick it for the first time!",
        snapshot.goal_name
    )
}

fn deadline_text(snapshot: &ProgressSnapshot) -> Option<String> {
    snapshot
        .last_occurrence
        .map(|last| deadline(snapshot.periodicity, last).format(DEADLINE_FORMAT).to_string())
}

#[derive(Clone, Copy, Default)]
pub struct DailyMessageStrategy;

impl NotificationStrategy for DailyMessageStrategy {
    fn on_completion_message(&self, snapshot: &ProgressSnapshot) -> Option<String> {
        if snapshot.streak == 0 {
            return None;
        }
        let headline = if snapshot.restarted {
            format!(
                "Fresh start on '{}': your {}-day streak lapsed, day 1 begins now.",
                snapshot.goal_name, snapshot.previous_streak
            )
        } else {
            format!(
                "Nice work on '{}'! {}-day streak.",
                snapshot.goal_name, snapshot.streak
            )
        };
        Some(format!("{}{}", headline, target_suffix(snapshot)))
    }

    fn on_expired_message(&self, snapshot: &ProgressSnapshot) -> Option<String> {
        if snapshot.streak != 0 {
            return None;
        }
        Some(format!(
            "'{}' was reset. Tick it today to start a new daily streak.",
            snapshot.goal_name
        ))
    }

    fn reminder_message(
        &self,
        snapshot: &ProgressSnapshot,
        evaluation: &TickEvaluation,
    ) -> Option<String> {
        match evaluation.reason {
            TickReason::NeverTicked => Some(never_ticked_message(snapshot)),
            TickReason::WithinWindow => Some(format!(
                "'{}' is ready for today's tick. Keep the {}-day streak alive before {}.",
                snapshot.goal_name,
                snapshot.streak,
                deadline_text(snapshot).unwrap_or_default()
            )),
            TickReason::Expired => Some(format!(
                "'{}' missed its daily window; the next tick starts a new streak.",
                snapshot.goal_name
            )),
            TickReason::TooEarly => None,
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct WeeklyMessageStrategy;

impl NotificationStrategy for WeeklyMessageStrategy {
    fn on_completion_message(&self, snapshot: &ProgressSnapshot) -> Option<String> {
        if snapshot.streak == 0 {
            return None;
        }
        let headline = if snapshot.restarted {
            format!(
                "Welcome back to '{}': your {}-week streak lapsed, week 1 begins now.",
                snapshot.goal_name, snapshot.previous_streak
            )
        } else {
            format!(
                "Week {} of '{}' done.",
                snapshot.streak, snapshot.goal_name
            )
        };
        Some(format!("{}{}", headline, target_suffix(snapshot)))
    }

    fn on_expired_message(&self, snapshot: &ProgressSnapshot) -> Option<String> {
        if snapshot.streak != 0 {
            return None;
        }
        Some(format!(
            "'{}' was reset. Tick it this week to start a new weekly streak.",
            snapshot.goal_name
        ))
    }

    fn reminder_message(
        &self,
        snapshot: &ProgressSnapshot,
        evaluation: &TickEvaluation,
    ) -> Option<String> {
        match evaluation.reason {
            TickReason::NeverTicked => Some(never_ticked_message(snapshot)),
            TickReason::WithinWindow => Some(format!(
                "'{}' is due this week. Tick it before {}.",
                snapshot.goal_name,
                deadline_text(snapshot).unwrap_or_default()
            )),
            TickReason::Expired => Some(format!(
                "'{}' missed its weekly window; the next tick starts a new streak.",
                snapshot.goal_name
            )),
            TickReason::TooEarly => None,
        }
    }
}

/// Strategy lookup keyed by periodicity.
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<Periodicity, Arc<dyn NotificationStrategy>>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    pub fn register(
        mut self,
        periodicity: Periodicity,
        strategy: Arc<dyn NotificationStrategy>,
    ) -> Self {
        self.strategies.insert(periodicity, strategy);
        self
    }

    pub fn strategy_for(&self, periodicity: Periodicity) -> Result<Arc<dyn NotificationStrategy>> {
        self.strategies.get(&periodicity).cloned().ok_or_else(|| {
            Error::Configuration(format!(
                "No notification strategy registered for {}",
                periodicity
            ))
        })
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::empty()
            .register(Periodicity::Daily, Arc::new(DailyMessageStrategy))
            .register(Periodicity::Weekly, Arc::new(WeeklyMessageStrategy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::evaluate;
    use chrono::{Duration, TimeZone, Utc};

    fn snapshot(periodicity: Periodicity, streak: i32, current_value: f64) -> ProgressSnapshot {
        let target_value = periodicity.default_target() * 3.0;
        ProgressSnapshot {
            goal_id: "g1".to_string(),
            goal_name: "Read".to_string(),
            periodicity,
            current_value,
            target_value,
            distance_from_target: target_value - current_value,
            streak,
            previous_streak: streak - 1,
            restarted: false,
            last_occurrence: Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_completion_and_expiry_are_mutually_exclusive() {
        let strategies: [Arc<dyn NotificationStrategy>; 2] =
            [Arc::new(DailyMessageStrategy), Arc::new(WeeklyMessageStrategy)];
        for strategy in strategies {
            let active = snapshot(Periodicity::Daily, 2, 2.0);
            assert!(strategy.on_completion_message(&active).is_some());
            assert!(strategy.on_expired_message(&active).is_none());

            let reset = snapshot(Periodicity::Daily, 0, 0.0);
            assert!(strategy.on_completion_message(&reset).is_none());
            assert!(strategy.on_expired_message(&reset).is_some());
        }
    }

    #[test]
    fn test_daily_completion_message_mentions_target() {
        let strategy = DailyMessageStrategy;
        let message = strategy
            .on_completion_message(&snapshot(Periodicity::Daily, 2, 2.0))
            .unwrap();
        assert_eq!(message, "Nice work on 'Read'! 2-day streak. 1 to go.");

        let message = strategy
            .on_completion_message(&snapshot(Periodicity::Daily, 3, 3.0))
            .unwrap();
        assert!(message.ends_with("Target of 3 reached!"));
    }

    #[test]
    fn test_restart_message_names_lapsed_streak() {
        let mut restarted = snapshot(Periodicity::Weekly, 1, 7.0);
        restarted.previous_streak = 4;
        restarted.restarted = true;
        let message = WeeklyMessageStrategy
            .on_completion_message(&restarted)
            .unwrap();
        assert!(message.contains("4-week streak lapsed"));
    }

    #[test]
    fn test_reminder_messages() {
        let snap = snapshot(Periodicity::Daily, 2, 2.0);
        let last = snap.last_occurrence.unwrap();

        let never = evaluate(Periodicity::Daily, None, last);
        assert!(DailyMessageStrategy
            .reminder_message(&snap, &never)
            .unwrap()
            .contains("never ticked"));

        let due = evaluate(Periodicity::Daily, Some(last), last + Duration::hours(30));
        let message = DailyMessageStrategy.reminder_message(&snap, &due).unwrap();
        assert!(message.contains("2025-03-03 09:00 UTC"));

        let early = evaluate(Periodicity::Daily, Some(last), last + Duration::hours(1));
        assert!(DailyMessageStrategy.reminder_message(&snap, &early).is_none());
    }

    #[test]
    fn test_registry_lookup() {
        let registry = StrategyRegistry::default();
        assert!(registry.strategy_for(Periodicity::Daily).is_ok());
        assert!(registry.strategy_for(Periodicity::Weekly).is_ok());

        let partial = StrategyRegistry::empty()
            .register(Periodicity::Daily, Arc::new(DailyMessageStrategy));
        assert!(matches!(
            partial.strategy_for(Periodicity::Weekly),
            Err(Error::Configuration(_))
        ));
    }
}
