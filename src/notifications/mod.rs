//! User-facing notification records and their factories.

pub mod factory;
pub mod types;

pub use types::{Notification, NotificationKind, Priority};
