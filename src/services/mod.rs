//! Business logic: update detection and notification delivery.

pub mod monitor;
pub mod notifications;

pub use monitor::{TickOutcome, UpdateMonitor};
