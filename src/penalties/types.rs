//! Penalty record definitions.
//!
//! T040: Define PenaltyRecord and PenaltyKind

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed XP debit for a missed scheduled workout.
pub const MISSED_WORKOUT_XP: i64 = 25;

/// Debit for breaking a streak shorter than a week.
pub const STREAK_BREAK_SHORT_XP: i64 = 50;

/// Debit for breaking a streak of a week or more.
pub const STREAK_BREAK_LONG_XP: i64 = 150;

/// Streak length at which the long-break tier applies.
pub const LONG_BREAK_THRESHOLD: u32 = 7;

/// Kind of penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyKind {
    /// A scheduled workout was never completed
    MissedWorkout,
    /// A running streak was broken
    StreakBroken,
}

impl PenaltyKind {
    /// Get display name for the penalty kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            PenaltyKind::MissedWorkout => "Missed Workout",
            PenaltyKind::StreakBroken => "Streak Broken",
        }
    }
}

impl std::fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A recorded XP debt that can later be partially resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Kind of penalty
    pub kind: PenaltyKind,
    /// Magnitude of the debit; always positive
    pub xp_lost: i64,
    /// Human-readable description
    pub description: String,
    /// Date of the missed workout, if applicable
    pub workout_date: Option<NaiveDate>,
    /// Whether the debt has been resolved; one-way
    pub resolved: bool,
    /// When the debt was resolved
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the penalty was recorded
    pub created_at: DateTime<Utc>,
}

impl PenaltyRecord {
    /// Create a new unresolved penalty.
    pub fn new(
        kind: PenaltyKind,
        xp_lost: i64,
        description: impl Into<String>,
        workout_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            xp_lost,
            description: description.into(),
            workout_date,
            resolved: false,
            resolved_at: None,
            created_at: now,
        }
    }
}
