use std::sync::Arc;

use super::{Notification, NotificationKind, NotificationSink, StrategyRegistry};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::{GoalState, GoalTransition};
use crate::progress::ProgressSnapshot;
use crate::schedule::Clock;

/// Callback invoked after a goal's progress changed.
pub trait GoalObserver: Send + Sync {
    fn notify(&self, state: &GoalState) -> Result<()>;
}

/// Builds the period-specific message for a state change and delivers it.
pub struct NotificationObserver {
    registry: StrategyRegistry,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl NotificationObserver {
    pub fn new(
        registry: StrategyRegistry,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            sink,
            clock,
        }
    }
}

impl GoalObserver for NotificationObserver {
    fn notify(&self, state: &GoalState) -> Result<()> {
        let strategy = self.registry.strategy_for(state.periodicity)?;
        let snapshot = ProgressSnapshot::from_state(state);

        let (kind, message) = match state.transition {
            GoalTransition::Ticked | GoalTransition::Restarted => (
                NotificationKind::Completion,
                strategy.on_completion_message(&snapshot),
            ),
            GoalTransition::Reset => (
                NotificationKind::Expired,
                strategy.on_expired_message(&snapshot),
            ),
        };

        let Some(message) = message else {
            return Ok(());
        };

        self.sink.deliver(&Notification {
            goal_id: state.goal.id.clone(),
            habit_id: state.goal.habit_id.clone(),
            kind,
            message,
            created_at: self.clock.now(),
        })
    }
}

/// Translates state changes into domain events.
pub struct DomainEventObserver {
    sink: Arc<dyn DomainEventSink>,
}

impl DomainEventObserver {
    pub fn new(sink: Arc<dyn DomainEventSink>) -> Self {
        Self { sink }
    }
}

impl GoalObserver for DomainEventObserver {
    fn notify(&self, state: &GoalState) -> Result<()> {
        let goal = &state.goal;
        let event = match state.transition {
            GoalTransition::Ticked => DomainEvent::goal_ticked(
                goal.habit_id.clone(),
                goal.id.clone(),
                goal.streak,
                goal.current_value,
            ),
            GoalTransition::Restarted => DomainEvent::goal_restarted(
                goal.habit_id.clone(),
                goal.id.clone(),
                state.previous_streak,
                goal.current_value,
            ),
            GoalTransition::Reset => {
                DomainEvent::goal_progress_reset(goal.habit_id.clone(), goal.id.clone())
            }
        };
        self.sink.emit(event);
        Ok(())
    }
}
