use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::habits_model::{Habit, HabitWithGoal, NewHabit};
use crate::errors::Result;
use crate::goals::NewGoal;
use crate::schedule::Periodicity;

/// Trait for habit repository operations
#[async_trait]
pub trait HabitRepositoryTrait: Send + Sync {
    /// Returns the habit or `Error::HabitNotFound`. Soft-deleted habits are not found.
    fn get_habit(&self, habit_id: &str) -> Result<Habit>;

    fn list_habits(&self) -> Result<Vec<Habit>>;

    /// Creates the habit and its goal in one transaction.
    async fn insert_habit_with_goal(
        &self,
        new_habit: NewHabit,
        new_goal: NewGoal,
    ) -> Result<HabitWithGoal>;

    /// Soft-deletes the habit and its goals. Progress history is untouched.
    async fn soft_delete_habit(&self, habit_id: &str, deleted_at: DateTime<Utc>) -> Result<usize>;

    fn validate_habit(&self, habit_id: &str) -> Result<String> {
        self.get_habit(habit_id).map(|habit| habit.id)
    }

    fn get_periodicity(&self, habit_id: &str) -> Result<Periodicity> {
        self.get_habit(habit_id).map(|habit| habit.periodicity)
    }
}

/// Trait for habit service operations
#[async_trait]
pub trait HabitServiceTrait: Send + Sync {
    fn get_habit(&self, habit_id: &str) -> Result<Habit>;
    fn list_habits(&self) -> Result<Vec<Habit>>;
    async fn create_habit(&self, new_habit: NewHabit) -> Result<HabitWithGoal>;
    async fn delete_habit(&self, habit_id: &str) -> Result<()>;
}
