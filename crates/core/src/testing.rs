//! In-memory repositories shared by service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalProgressUpdate, GoalRepositoryTrait, GoalTick, NewGoal, TickRecord};
use crate::habits::{Habit, HabitRepositoryTrait, HabitWithGoal, NewHabit};
use crate::progress::{NewProgressEntry, ProgressEntry, ProgressRepositoryTrait};
use crate::schedule::Periodicity;
use crate::settings::{SettingsRepositoryTrait, SettingsUpdate, TrackerSettings};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 19, 8, 0, 0).unwrap()
}

#[derive(Default)]
struct State {
    habits: Vec<Habit>,
    goals: Vec<Goal>,
    progress: Vec<ProgressEntry>,
    settings: TrackerSettings,
    next_id: u64,
    force_conflict: bool,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn goal_mut(&mut self, goal_id: &str) -> Result<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|g| g.id == goal_id && g.deleted_at.is_none())
            .ok_or_else(|| Error::GoalNotFound(goal_id.to_string()))
    }

    fn apply_update(&mut self, update: &GoalProgressUpdate) -> Result<Goal> {
        let force_conflict = self.force_conflict;
        let goal = self.goal_mut(&update.goal_id)?;
        if force_conflict || goal.version != update.expected_version {
            return Err(Error::ConcurrentUpdateConflict {
                goal_id: update.goal_id.clone(),
            });
        }
        goal.current_value = update.current_value;
        goal.streak = update.streak;
        goal.last_reset_at = update.last_reset_at;
        goal.version += 1;
        Ok(goal.clone())
    }
}

/// One store backing the habit, goal, progress and settings traits, so that
/// `apply_tick` can update the goal and append history atomically.
#[derive(Clone, Default)]
pub struct InMemoryTracker {
    state: Arc<Mutex<State>>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_habit(&self, periodicity: Periodicity, target_value: f64) -> (Habit, Goal) {
        let mut state = self.state.lock().unwrap();
        let habit = Habit {
            id: state.next_id("habit"),
            name: format!("{} habit", periodicity),
            action: "Do the thing".to_string(),
            periodicity,
            created_at: start_time(),
            deleted_at: None,
        };
        let goal = Goal {
            id: state.next_id("goal"),
            habit_id: habit.id.clone(),
            name: format!("{} goal", periodicity),
            description: None,
            target_value,
            current_value: 0.0,
            streak: 0,
            version: 0,
            last_reset_at: None,
            created_at: start_time(),
            deleted_at: None,
        };
        state.habits.push(habit.clone());
        state.goals.push(goal.clone());
        (habit, goal)
    }

    /// Seeds a history entry directly, bypassing the workflow.
    pub fn add_entry(&self, goal_id: &str, occurred_at: DateTime<Utc>, streak_at_time: i32) {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("progress");
        state.progress.push(ProgressEntry {
            id,
            goal_id: Some(goal_id.to_string()),
            current_value_snapshot: 0.0,
            distance_from_target: 0.0,
            occurred_at,
            streak_at_time,
        });
    }

    pub fn set_gating(&self, gating: crate::settings::CompletionGating) {
        self.state.lock().unwrap().settings.completion_gating = gating;
    }

    pub fn set_force_conflict(&self, force: bool) {
        self.state.lock().unwrap().force_conflict = force;
    }

    pub fn goal(&self, goal_id: &str) -> Goal {
        self.state
            .lock()
            .unwrap()
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
            .unwrap()
    }

    pub fn entries_for(&self, goal_id: &str) -> Vec<ProgressEntry> {
        self.state
            .lock()
            .unwrap()
            .progress
            .iter()
            .filter(|p| p.goal_id.as_deref() == Some(goal_id))
            .cloned()
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.state.lock().unwrap().progress.len()
    }
}

#[async_trait]
impl HabitRepositoryTrait for InMemoryTracker {
    fn get_habit(&self, habit_id: &str) -> Result<Habit> {
        self.state
            .lock()
            .unwrap()
            .habits
            .iter()
            .find(|h| h.id == habit_id && h.deleted_at.is_none())
            .cloned()
            .ok_or_else(|| Error::HabitNotFound(habit_id.to_string()))
    }

    fn list_habits(&self) -> Result<Vec<Habit>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .habits
            .iter()
            .filter(|h| h.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn insert_habit_with_goal(
        &self,
        new_habit: NewHabit,
        new_goal: NewGoal,
    ) -> Result<HabitWithGoal> {
        let mut state = self.state.lock().unwrap();
        let habit = Habit {
            id: new_habit.id.unwrap_or_else(|| state.next_id("habit")),
            name: new_habit.name,
            action: new_habit.action,
            periodicity: new_habit.periodicity,
            created_at: start_time(),
            deleted_at: None,
        };
        let goal = Goal {
            id: new_goal.id.unwrap_or_else(|| state.next_id("goal")),
            habit_id: habit.id.clone(),
            name: new_goal.name,
            description: new_goal.description,
            target_value: new_goal.target_value,
            current_value: 0.0,
            streak: 0,
            version: 0,
            last_reset_at: None,
            created_at: start_time(),
            deleted_at: None,
        };
        state.habits.push(habit.clone());
        state.goals.push(goal.clone());
        Ok(HabitWithGoal { habit, goal })
    }

    async fn soft_delete_habit(&self, habit_id: &str, deleted_at: DateTime<Utc>) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let mut affected = 0;
        for habit in state.habits.iter_mut().filter(|h| h.id == habit_id) {
            habit.deleted_at = Some(deleted_at);
            affected += 1;
        }
        for goal in state.goals.iter_mut().filter(|g| g.habit_id == habit_id) {
            goal.deleted_at = Some(deleted_at);
            affected += 1;
        }
        Ok(affected)
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryTracker {
    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.state
            .lock()
            .unwrap()
            .goal_mut(goal_id)
            .map(|g| g.clone())
    }

    fn list_goals(&self) -> Result<Vec<Goal>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .goals
            .iter()
            .filter(|g| g.deleted_at.is_none())
            .cloned()
            .collect())
    }

    fn list_goals_for_habit(&self, habit_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .list_goals()?
            .into_iter()
            .filter(|g| g.habit_id == habit_id)
            .collect())
    }

    async fn update_progress(&self, update: GoalProgressUpdate) -> Result<Goal> {
        self.state.lock().unwrap().apply_update(&update)
    }

    async fn apply_tick(&self, tick: GoalTick) -> Result<TickRecord> {
        let mut state = self.state.lock().unwrap();
        let goal = state.apply_update(&tick.update)?;
        let entry = ProgressEntry {
            id: state.next_id("progress"),
            goal_id: Some(goal.id.clone()),
            current_value_snapshot: goal.current_value,
            distance_from_target: tick.distance_from_target,
            occurred_at: tick.occurred_at,
            streak_at_time: goal.streak,
        };
        state.progress.push(entry.clone());
        Ok(TickRecord { goal, entry })
    }
}

#[async_trait]
impl ProgressRepositoryTrait for InMemoryTracker {
    async fn append(&self, new_entry: NewProgressEntry) -> Result<ProgressEntry> {
        let mut state = self.state.lock().unwrap();
        let entry = ProgressEntry {
            id: state.next_id("progress"),
            goal_id: Some(new_entry.goal_id),
            current_value_snapshot: new_entry.current_value_snapshot,
            distance_from_target: new_entry.distance_from_target,
            occurred_at: new_entry.occurred_at,
            streak_at_time: new_entry.streak_at_time,
        };
        state.progress.push(entry.clone());
        Ok(entry)
    }

    fn most_recent(&self, goal_id: &str) -> Result<Option<ProgressEntry>> {
        Ok(self
            .entries_for(goal_id)
            .into_iter()
            .max_by_key(|p| p.occurred_at))
    }

    fn list_for_goal(&self, goal_id: &str) -> Result<Vec<ProgressEntry>> {
        let mut entries = self.entries_for(goal_id);
        entries.sort_by_key(|p| p.occurred_at);
        Ok(entries)
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemoryTracker {
    fn get_settings(&self) -> Result<TrackerSettings> {
        Ok(self.state.lock().unwrap().settings.clone())
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        if let Some(gating) = update.completion_gating {
            self.state.lock().unwrap().settings.completion_gating = gating;
        }
        Ok(())
    }
}
