//! Domain events module.
//!
//! Core services emit domain events through a [`DomainEventSink`] after a
//! mutation has been committed. Runtime adapters decide what to do with them
//! (push to a UI, schedule a reminder, write an audit log).

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
