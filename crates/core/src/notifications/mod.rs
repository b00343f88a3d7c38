//! Notification dispatch.
//!
//! After a goal's progress changes, the [`NotificationDispatcher`] hands the
//! new [`GoalState`](crate::goals::GoalState) to every attached
//! [`GoalObserver`], in attachment order. The [`NotificationObserver`] turns
//! the state into a human message using the [`NotificationStrategy`] registered
//! for the habit's periodicity. Observer failures are logged and never undo the
//! mutation that triggered them.

mod dispatcher;
mod notification_model;
mod observers;
mod sink;
mod strategy;

pub use dispatcher::NotificationDispatcher;
pub use notification_model::{Notification, NotificationKind};
pub use observers::{DomainEventObserver, GoalObserver, NotificationObserver};
pub use sink::{LogNotificationSink, MockNotificationSink, NotificationSink};
pub use strategy::{
    DailyMessageStrategy, NotificationStrategy, StrategyRegistry, WeeklyMessageStrategy,
};
