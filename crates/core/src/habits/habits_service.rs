use log::{debug, info};
use std::sync::Arc;

use super::habits_model::{Habit, HabitWithGoal, NewHabit};
use super::habits_traits::{HabitRepositoryTrait, HabitServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::schedule::Clock;
use async_trait::async_trait;

/// Service for creating and retiring habits.
pub struct HabitService {
    habit_repo: Arc<dyn HabitRepositoryTrait>,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl HabitService {
    pub fn new(habit_repo: Arc<dyn HabitRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        HabitService {
            habit_repo,
            clock,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }
}

#[async_trait]
impl HabitServiceTrait for HabitService {
    fn get_habit(&self, habit_id: &str) -> Result<Habit> {
        self.habit_repo.get_habit(habit_id)
    }

    fn list_habits(&self) -> Result<Vec<Habit>> {
        self.habit_repo.list_habits()
    }

    async fn create_habit(&self, new_habit: NewHabit) -> Result<HabitWithGoal> {
        new_habit.validate()?;
        let new_goal = new_habit.goal();
        new_goal.validate()?;

        debug!(
            "Creating {} habit '{}' with goal '{}' (target {})",
            new_habit.periodicity, new_habit.name, new_goal.name, new_goal.target_value
        );

        let created = self
            .habit_repo
            .insert_habit_with_goal(new_habit, new_goal)
            .await?;

        info!(
            "Created habit {} with goal {}",
            created.habit.id, created.goal.id
        );
        self.event_sink.emit(DomainEvent::habit_created(
            created.habit.id.clone(),
            created.goal.id.clone(),
            created.habit.periodicity,
        ));
        Ok(created)
    }

    async fn delete_habit(&self, habit_id: &str) -> Result<()> {
        let habit_id = self.habit_repo.validate_habit(habit_id)?;
        let affected = self
            .habit_repo
            .soft_delete_habit(&habit_id, self.clock.now())
            .await?;

        info!("Soft-deleted habit {} ({} rows)", habit_id, affected);
        self.event_sink.emit(DomainEvent::habit_deleted(habit_id));
        Ok(())
    }
}
