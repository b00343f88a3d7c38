//! Goals module - domain models, the completion workflow, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;


pub use goals_model::{
    CompletionOutcome, Goal, GoalProgressUpdate, GoalState, GoalTick, GoalTransition, NewGoal,
    TickRecord,
};
pub use goals_service::{plan_tick, GoalCompletionService};
pub use goals_traits::{GoalCompletionServiceTrait, GoalRepositoryTrait};
