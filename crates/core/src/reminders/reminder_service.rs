use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use super::reminder_model::PendingReminder;
use crate::errors::Result;
use crate::goals::{Goal, GoalRepositoryTrait};
use crate::habits::{Habit, HabitRepositoryTrait};
use crate::notifications::StrategyRegistry;
use crate::progress::{ProgressRepositoryTrait, ProgressSnapshot};
use crate::schedule::{deadline, evaluate, Clock, Periodicity, TickEvaluation};

/// Trait for reminder operations
pub trait ReminderServiceTrait: Send + Sync {
    /// Tickable goals annotated with a period-specific message.
    fn scan_pending_reminders(&self) -> Result<Vec<PendingReminder>>;

    /// The same goals as `scan_pending_reminders`, without annotations.
    fn tickable_goals(&self) -> Result<Vec<Goal>>;
}

/// Read-only scan of every live goal against its tick window.
pub struct ReminderService {
    habit_repo: Arc<dyn HabitRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    progress_repo: Arc<dyn ProgressRepositoryTrait>,
    registry: StrategyRegistry,
    clock: Arc<dyn Clock>,
}

struct Candidate {
    goal: Goal,
    periodicity: Periodicity,
    snapshot: ProgressSnapshot,
    evaluation: TickEvaluation,
}

impl ReminderService {
    pub fn new(
        habit_repo: Arc<dyn HabitRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        progress_repo: Arc<dyn ProgressRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        ReminderService {
            habit_repo,
            goal_repo,
            progress_repo,
            registry: StrategyRegistry::default(),
            clock,
        }
    }

    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Evaluates every goal and keeps the tickable ones.
    fn tickable_candidates(&self) -> Result<Vec<Candidate>> {
        let habits: HashMap<String, Habit> = self
            .habit_repo
            .list_habits()?
            .into_iter()
            .map(|habit| (habit.id.clone(), habit))
            .collect();
        let now = self.clock.now();

        let mut candidates = Vec::new();
        for goal in self.goal_repo.list_goals()? {
            let Some(habit) = habits.get(&goal.habit_id) else {
                warn!(
                    "Skipping goal {}: habit {} not found",
                    goal.id, goal.habit_id
                );
                continue;
            };

            let latest = self.progress_repo.most_recent(&goal.id)?;
            // A reset goal is reminded about as if it had never been ticked.
            let last_entry = goal.last_counted_entry(latest.as_ref());
            let evaluation = evaluate(
                habit.periodicity,
                last_entry.map(|entry| entry.occurred_at),
                now,
            );
            if !evaluation.is_tickable {
                debug!("Goal {} not tickable: {:?}", goal.id, evaluation.reason);
                continue;
            }

            candidates.push(Candidate {
                snapshot: ProgressSnapshot::from_goal(&goal, habit.periodicity, last_entry),
                periodicity: habit.periodicity,
                evaluation,
                goal,
            });
        }
        Ok(candidates)
    }
}

impl ReminderServiceTrait for ReminderService {
    fn scan_pending_reminders(&self) -> Result<Vec<PendingReminder>> {
        let candidates = self.tickable_candidates()?;
        let mut reminders = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let strategy = self.registry.strategy_for(candidate.periodicity)?;
            let message = strategy
                .reminder_message(&candidate.snapshot, &candidate.evaluation)
                .unwrap_or_default();

            reminders.push(PendingReminder {
                goal_id: candidate.goal.id,
                goal_name: candidate.goal.name,
                habit_id: candidate.goal.habit_id,
                periodicity: candidate.periodicity,
                reason: candidate.evaluation.reason,
                deadline: candidate
                    .snapshot
                    .last_occurrence
                    .map(|last| deadline(candidate.periodicity, last)),
                message,
            });
        }

        debug!("{} pending reminders", reminders.len());
        Ok(reminders)
    }

    fn tickable_goals(&self) -> Result<Vec<Goal>> {
        Ok(self
            .tickable_candidates()?
            .into_iter()
            .map(|candidate| candidate.goal)
            .collect())
    }
}
