use std::sync::Arc;

use log::warn;

use super::{
    DomainEventObserver, GoalObserver, NotificationObserver, NotificationSink, StrategyRegistry,
};
use crate::events::DomainEventSink;
use crate::goals::GoalState;
use crate::schedule::Clock;

/// Fans a goal state change out to the attached observers.
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    observers: Vec<Arc<dyn GoalObserver>>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification observer first, then the domain event observer.
    pub fn standard(
        registry: StrategyRegistry,
        notification_sink: Arc<dyn NotificationSink>,
        event_sink: Arc<dyn DomainEventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new()
            .attach(Arc::new(NotificationObserver::new(
                registry,
                notification_sink,
                clock,
            )))
            .attach(Arc::new(DomainEventObserver::new(event_sink)))
    }

    pub fn attach(mut self, observer: Arc<dyn GoalObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notifies every observer in attachment order.
    ///
    /// A failing observer is logged and skipped; the rest still run.
    /// Returns the number of observers that failed.
    pub fn dispatch(&self, state: &GoalState) -> usize {
        let mut failures = 0;
        for observer in &self.observers {
            if let Err(e) = observer.notify(state) {
                failures += 1;
                warn!(
                    "Notification dispatch failed for goal {}: {}",
                    state.goal.id, e
                );
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, Result};
    use crate::events::MockDomainEventSink;
    use crate::goals::{Goal, GoalTransition};
    use crate::notifications::{MockNotificationSink, NotificationKind};
    use crate::schedule::{ManualClock, Periodicity};
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    struct RecordingObserver {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    impl GoalObserver for RecordingObserver {
        fn notify(&self, _state: &GoalState) -> Result<()> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(Error::NotificationDispatch(self.name.to_string()));
            }
            Ok(())
        }
    }

    fn state(streak: i32, transition: GoalTransition) -> GoalState {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        GoalState {
            goal: Goal {
                id: "g1".to_string(),
                habit_id: "h1".to_string(),
                name: "Meditate".to_string(),
                description: None,
                target_value: 7.0,
                current_value: streak as f64,
                streak,
                version: 1,
                last_reset_at: None,
                created_at: now,
                deleted_at: None,
            },
            periodicity: Periodicity::Daily,
            transition,
            previous_streak: 0,
            last_entry: None,
        }
    }

    #[test]
    fn test_observers_run_in_order_and_failures_are_swallowed() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = NotificationDispatcher::new()
            .attach(Arc::new(RecordingObserver {
                name: "first",
                log: log.clone(),
                fail: true,
            }))
            .attach(Arc::new(RecordingObserver {
                name: "second",
                log: log.clone(),
                fail: false,
            }));

        let failures = dispatcher.dispatch(&state(1, GoalTransition::Ticked));

        assert_eq!(failures, 1);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_standard_dispatcher_delivers_message_and_event() {
        let notifications = MockNotificationSink::new();
        let events = MockDomainEventSink::new();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        ));
        let dispatcher = NotificationDispatcher::standard(
            StrategyRegistry::default(),
            Arc::new(notifications.clone()),
            Arc::new(events.clone()),
            clock,
        );
        assert_eq!(dispatcher.len(), 2);

        assert_eq!(dispatcher.dispatch(&state(3, GoalTransition::Ticked)), 0);
        assert_eq!(dispatcher.dispatch(&state(0, GoalTransition::Reset)), 0);

        let delivered = notifications.delivered();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].kind, NotificationKind::Completion);
        assert!(delivered[0].message.contains("3-day streak"));
        assert_eq!(delivered[1].kind, NotificationKind::Expired);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_failed_delivery_does_not_stop_event_observer() {
        let notifications = MockNotificationSink::new();
        notifications.set_fail(true);
        let events = MockDomainEventSink::new();
        let dispatcher = NotificationDispatcher::standard(
            StrategyRegistry::default(),
            Arc::new(notifications),
            Arc::new(events.clone()),
            Arc::new(ManualClock::new(Utc::now())),
        );

        assert_eq!(dispatcher.dispatch(&state(1, GoalTransition::Ticked)), 1);
        assert_eq!(events.len(), 1);
    }
}
