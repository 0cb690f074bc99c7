//! Notification type definitions.
//!
//! T060: Define Notification, NotificationKind, and Priority

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Upcoming workout reminder
    Reminder,
    /// Missed workouts or accumulating debt
    Warning,
    /// Plan progress summary
    Progress,
    /// Plan milestone reached
    Milestone,
    /// XP was debited
    Penalty,
}

/// Display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// A user-facing notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: Uuid,
    /// Kind of notification
    pub kind: NotificationKind,
    /// Short title
    pub title: String,
    /// Body text
    pub message: String,
    /// Related plan, if any
    pub plan_id: Option<Uuid>,
    /// Related workout, if any
    pub workout_id: Option<Uuid>,
    /// Display priority
    pub priority: Priority,
    /// Whether the user has seen it
    pub read: bool,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
    /// Deep link for the UI, if any
    pub action_url: Option<String>,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            plan_id: None,
            workout_id: None,
            priority,
            read: false,
            created_at: Utc::now(),
            action_url: None,
        }
    }

    /// Attach a plan reference.
    pub fn with_plan(mut self, plan_id: Uuid) -> Self {
        self.plan_id = Some(plan_id);
        self
    }

    /// Attach a workout reference.
    pub fn with_workout(mut self, workout_id: Uuid) -> Self {
        self.workout_id = Some(workout_id);
        self
    }

    /// Attach a deep link.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}
