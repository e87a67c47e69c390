//! Notification rendering and delivery.

pub mod dispatcher;
pub mod renderer;

pub use dispatcher::{DryRunDispatcher, NotificationDispatcher, OutboxDispatcher};
pub use renderer::{NotificationRenderer, TextReportRenderer};
