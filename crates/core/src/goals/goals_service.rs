use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::errors::{Error, Result};
use crate::events::NoOpDomainEventSink;
use crate::goals::goals_model::{
    CompletionOutcome, Goal, GoalProgressUpdate, GoalState, GoalTick, GoalTransition, TickRecord,
};
use crate::goals::goals_traits::{GoalCompletionServiceTrait, GoalRepositoryTrait};
use crate::habits::{Habit, HabitRepositoryTrait};
use crate::notifications::{LogNotificationSink, NotificationDispatcher, StrategyRegistry};
use crate::progress::{ProgressEntry, ProgressRepositoryTrait};
use crate::schedule::{evaluate, Clock, Periodicity, TickEvaluation, TickReason};
use crate::settings::{CompletionGating, SettingsRepositoryTrait};

/// Computes the progress update for one completion.
///
/// Under `Permissive` gating every completion adds the periodicity increment;
/// the evaluation only decides whether the streak grows or restarts.
/// Under `Enforced` gating a too-early completion is rejected and a lapsed
/// goal restarts from zero.
pub fn plan_tick(
    goal: &Goal,
    periodicity: Periodicity,
    evaluation: &TickEvaluation,
    gating: CompletionGating,
) -> Result<(GoalProgressUpdate, GoalTransition)> {
    let increment = periodicity.increment();
    let lapsed = evaluation.reason == TickReason::Expired && goal.streak > 0;

    let (current_value, streak, transition) = match (evaluation.reason, gating) {
        (TickReason::TooEarly, CompletionGating::Enforced) => {
            return Err(Error::TooEarly {
                goal_id: goal.id.clone(),
                wait: evaluation.wait_remaining(periodicity),
            });
        }
        (TickReason::Expired, CompletionGating::Enforced) => {
            (increment, 1, restart_or_tick(lapsed))
        }
        (TickReason::Expired, CompletionGating::Permissive) => (
            goal.current_value + increment,
            1,
            restart_or_tick(lapsed),
        ),
        _ => (
            goal.current_value + increment,
            goal.streak + 1,
            GoalTransition::Ticked,
        ),
    };

    Ok((
        GoalProgressUpdate {
            goal_id: goal.id.clone(),
            expected_version: goal.version,
            current_value,
            streak,
            last_reset_at: goal.last_reset_at,
        },
        transition,
    ))
}

fn restart_or_tick(lapsed: bool) -> GoalTransition {
    if lapsed {
        GoalTransition::Restarted
    } else {
        GoalTransition::Ticked
    }
}

/// Drives goal completions: validation, progress update, history, notifications.
///
/// Completions of the same goal are serialized in-process by a per-goal lock;
/// the repository's version check catches writers outside this process.
/// A lock entry lives only while some call holds or waits on it.
pub struct GoalCompletionService {
    habit_repo: Arc<dyn HabitRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    progress_repo: Arc<dyn ProgressRepositoryTrait>,
    settings_repo: Arc<dyn SettingsRepositoryTrait>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    goal_locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Everything a completion wrote, captured under the goal lock.
struct AppliedTick {
    previous: Goal,
    record: TickRecord,
    evaluation: TickEvaluation,
    transition: GoalTransition,
}

impl GoalCompletionService {
    /// Messages go to the log and domain events are dropped until a
    /// dispatcher is supplied with [`with_dispatcher`](Self::with_dispatcher).
    pub fn new(
        habit_repo: Arc<dyn HabitRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        progress_repo: Arc<dyn ProgressRepositoryTrait>,
        settings_repo: Arc<dyn SettingsRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let dispatcher = NotificationDispatcher::standard(
            StrategyRegistry::default(),
            Arc::new(LogNotificationSink),
            Arc::new(NoOpDomainEventSink),
            clock.clone(),
        );
        GoalCompletionService {
            habit_repo,
            goal_repo,
            progress_repo,
            settings_repo,
            dispatcher,
            clock,
            goal_locks: DashMap::new(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: NotificationDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    /// Number of goals with a live lock entry.
    pub fn active_goal_locks(&self) -> usize {
        self.goal_locks.len()
    }

    fn lock_for(&self, goal_id: &str) -> Arc<Mutex<()>> {
        self.goal_locks
            .entry(goal_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the table entry once the caller's handle is the last one outside the map.
    fn release_lock(&self, goal_id: &str, lock: Arc<Mutex<()>>) {
        self.goal_locks.remove_if(goal_id, |_, held| {
            Arc::ptr_eq(held, &lock) && Arc::strong_count(held) == 2
        });
    }

    /// Validates that both exist and that the goal belongs to the habit.
    fn load_goal_for_habit(&self, habit_id: &str, goal_id: &str) -> Result<(Habit, Goal)> {
        let habit = self.habit_repo.get_habit(habit_id)?;
        let goal = self.goal_repo.get_goal(goal_id)?;
        if goal.habit_id != habit.id {
            debug!(
                "Goal {} belongs to habit {}, not {}",
                goal.id, goal.habit_id, habit.id
            );
            return Err(Error::GoalNotFound(goal_id.to_string()));
        }
        Ok((habit, goal))
    }

    /// Latest history entry for notifications. Falls back to `written` on read errors.
    fn refreshed_last_entry(
        &self,
        goal_id: &str,
        written: Option<&ProgressEntry>,
    ) -> Option<ProgressEntry> {
        match self.progress_repo.most_recent(goal_id) {
            Ok(Some(entry)) => Some(entry),
            Ok(None) => written.cloned(),
            Err(e) => {
                warn!("Could not refresh last progress of goal {}: {}", goal_id, e);
                written.cloned()
            }
        }
    }

    /// Evaluates and writes one completion. Caller holds the goal lock.
    async fn apply_completion(
        &self,
        goal_id: &str,
        periodicity: Periodicity,
    ) -> Result<AppliedTick> {
        // Re-read under the lock so the expected version is current.
        let goal = self.goal_repo.get_goal(goal_id)?;
        let gating = self.settings_repo.get_settings()?.completion_gating;
        let last_entry = self.progress_repo.most_recent(&goal.id)?;
        let now = self.clock.now();

        let evaluation = evaluate(
            periodicity,
            goal.last_counted_entry(last_entry.as_ref())
                .map(|entry| entry.occurred_at),
            now,
        );
        debug!(
            "Completing goal {} ({}): {:?}, gating {}",
            goal.id, periodicity, evaluation.reason, gating
        );

        let (update, transition) = plan_tick(&goal, periodicity, &evaluation, gating)?;
        let distance_from_target = goal.target_value - update.current_value;
        // History timestamps never go backwards, even if the clock does.
        let occurred_at = last_entry
            .as_ref()
            .map_or(now, |entry| now.max(entry.occurred_at));

        let record = self
            .goal_repo
            .apply_tick(GoalTick {
                update,
                distance_from_target,
                occurred_at,
            })
            .await?;

        Ok(AppliedTick {
            previous: goal,
            record,
            evaluation,
            transition,
        })
    }

    /// Zeroes progress and stamps the reset. Caller holds the goal lock.
    async fn apply_reset(&self, goal_id: &str) -> Result<(Goal, Goal)> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        let now = self.clock.now();
        // Stamped no earlier than the last entry, so all prior history predates it.
        let reset_at = self
            .progress_repo
            .most_recent(&goal.id)?
            .map_or(now, |entry| now.max(entry.occurred_at));

        let updated = self
            .goal_repo
            .update_progress(GoalProgressUpdate {
                goal_id: goal.id.clone(),
                expected_version: goal.version,
                current_value: 0.0,
                streak: 0,
                last_reset_at: Some(reset_at),
            })
            .await?;
        Ok((goal, updated))
    }
}

#[async_trait]
impl GoalCompletionServiceTrait for GoalCompletionService {
    async fn complete_goal(&self, habit_id: &str, goal_id: &str) -> Result<CompletionOutcome> {
        let (habit, goal) = self.load_goal_for_habit(habit_id, goal_id)?;
        let periodicity = habit.periodicity;

        let lock = self.lock_for(&goal.id);
        let applied = {
            let _guard = lock.lock().await;
            self.apply_completion(&goal.id, periodicity).await
        };
        self.release_lock(&goal.id, lock);
        let AppliedTick {
            previous,
            record,
            evaluation,
            transition,
        } = applied?;

        info!(
            "Goal {} ticked: value {} -> {}, streak {} -> {}",
            previous.id,
            previous.current_value,
            record.goal.current_value,
            previous.streak,
            record.goal.streak
        );

        let state = GoalState {
            goal: record.goal.clone(),
            periodicity,
            transition,
            previous_streak: previous.streak,
            last_entry: self.refreshed_last_entry(&previous.id, Some(&record.entry)),
        };
        self.dispatcher.dispatch(&state);

        Ok(CompletionOutcome {
            goal: record.goal,
            entry: record.entry,
            evaluation,
            transition,
        })
    }

    async fn reset_progress(&self, habit_id: &str, goal_id: &str) -> Result<Goal> {
        let (habit, goal) = self.load_goal_for_habit(habit_id, goal_id)?;

        let lock = self.lock_for(&goal.id);
        let reset = {
            let _guard = lock.lock().await;
            self.apply_reset(&goal.id).await
        };
        self.release_lock(&goal.id, lock);
        let (previous, updated) = reset?;

        info!(
            "Goal {} reset (value was {}, streak was {})",
            previous.id, previous.current_value, previous.streak
        );

        let state = GoalState {
            goal: updated.clone(),
            periodicity: habit.periodicity,
            transition: GoalTransition::Reset,
            previous_streak: previous.streak,
            last_entry: self.refreshed_last_entry(&previous.id, None),
        };
        self.dispatcher.dispatch(&state);

        Ok(updated)
    }

    fn progress_history(&self, goal_id: &str) -> Result<Vec<ProgressEntry>> {
        self.progress_repo.list_for_goal(goal_id)
    }
}
