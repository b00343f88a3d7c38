use std::sync::{Arc, Mutex};

use log::info;

use super::Notification;
use crate::errors::{Error, Result};

/// Delivery channel for notifications.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Writes notifications to the info log. There is no delivery guarantee.
#[derive(Clone, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        info!(
            "[{:?}] goal {} (habit {}): {}",
            notification.kind, notification.goal_id, notification.habit_id, notification.message
        );
        Ok(())
    }
}

/// Collects notifications in memory and can be told to fail, for tests.
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    delivered: Arc<Mutex<Vec<Notification>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.delivered()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl NotificationSink for MockNotificationSink {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(Error::NotificationDispatch(
                "Intentional delivery failure".to_string(),
            ));
        }
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
