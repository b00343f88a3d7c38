//! Reminders module - scans goals for the ones ready to be ticked.

mod reminder_model;
mod reminder_service;


pub use reminder_model::PendingReminder;
pub use reminder_service::{ReminderService, ReminderServiceTrait};
