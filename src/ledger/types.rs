//! XP event log and profile.
//!
//! T022: Define XpEvent and XpEventKind
//! T023: Implement XpProfile with bounded event log and level re-derivation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::levels::level_for_xp;

/// Maximum number of events retained in the profile log.
pub const EVENT_LOG_CAP: usize = 100;

/// Base XP awarded for completing a workout.
pub const WORKOUT_BASE_XP: i64 = 100;

/// Bonus XP per day of streak.
pub const STREAK_BONUS_PER_DAY: i64 = 10;

/// The streak multiplier stops growing past this many days.
pub const STREAK_BONUS_CAP_DAYS: u32 = 7;

/// Kind of ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpEventKind {
    /// Base award for a completed workout
    WorkoutComplete,
    /// Bonus for an unbroken streak
    StreakBonus,
    /// Reward for finishing every objective of a quest
    QuestComplete,
    /// Debit for a scheduled workout that never happened
    MissedWorkout,
    /// Debit for breaking a short streak
    StreakBrokenShort,
    /// Debit for breaking a streak of a week or more
    StreakBrokenLong,
    /// Partial refund for resolving a penalty
    DebtResolved,
}

impl XpEventKind {
    /// Get display name for the event kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            XpEventKind::WorkoutComplete => "Workout Complete",
            XpEventKind::StreakBonus => "Streak Bonus",
            XpEventKind::QuestComplete => "Quest Complete",
            XpEventKind::MissedWorkout => "Missed Workout",
            XpEventKind::StreakBrokenShort => "Streak Broken",
            XpEventKind::StreakBrokenLong => "Long Streak Broken",
            XpEventKind::DebtResolved => "Debt Resolved",
        }
    }
}

impl std::fmt::Display for XpEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single immutable entry in the XP ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpEvent {
    /// Unique identifier
    pub id: Uuid,
    /// Kind of event
    pub kind: XpEventKind,
    /// Signed XP delta
    pub delta: i64,
    /// Human-readable description
    pub description: String,
    /// When the event was recorded
    pub created_at: DateTime<Utc>,
    /// Workout that triggered the event, if any
    pub workout_id: Option<Uuid>,
}

/// The user's XP state: total, derived level, and bounded event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpProfile {
    /// Total experience points, never negative
    pub total_xp: i64,
    /// Level derived from `total_xp`
    pub current_level: u32,
    /// Level name derived from `total_xp`
    pub level_name: String,
    /// Most recent events, oldest first, capped at [`EVENT_LOG_CAP`]
    pub events: Vec<XpEvent>,
    /// Count of consecutive negative events
    pub penalty_streak: u32,
    /// Cursor for the missed-workout scan
    pub last_checked_date: Option<NaiveDate>,
}

impl Default for XpProfile {
    fn default() -> Self {
        let def = level_for_xp(0);
        Self {
            total_xp: 0,
            current_level: def.level,
            level_name: def.name.to_string(),
            events: Vec::new(),
            penalty_streak: 0,
            last_checked_date: None,
        }
    }
}

impl XpProfile {
    /// Create a fresh profile at zero XP.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and apply its delta.
    ///
    /// Total XP is clamped at zero, the level is re-derived, the penalty
    /// streak resets on a positive delta and grows on a negative one, and
    /// the event log keeps only the most recent [`EVENT_LOG_CAP`] entries.
    pub fn add_xp(
        &mut self,
        kind: XpEventKind,
        delta: i64,
        description: impl Into<String>,
        workout_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Uuid {
        let event = XpEvent {
            id: Uuid::new_v4(),
            kind,
            delta,
            description: description.into(),
            created_at: now,
            workout_id,
        };
        let event_id = event.id;

        self.events.push(event);
        if self.events.len() > EVENT_LOG_CAP {
            let excess = self.events.len() - EVENT_LOG_CAP;
            self.events.drain(..excess);
        }

        self.total_xp = (self.total_xp + delta).max(0);

        if delta > 0 {
            self.penalty_streak = 0;
        } else if delta < 0 {
            self.penalty_streak += 1;
        }

        self.relevel();

        tracing::debug!(kind = %kind, delta, total = self.total_xp, "xp event recorded");
        event_id
    }

    /// Award the base completion XP plus the capped streak bonus.
    ///
    /// Returns the total XP credited.
    pub fn award_workout_xp(
        &mut self,
        workout_id: Option<Uuid>,
        streak: u32,
        now: DateTime<Utc>,
    ) -> i64 {
        self.add_xp(
            XpEventKind::WorkoutComplete,
            WORKOUT_BASE_XP,
            "Completed a workout",
            workout_id,
            now,
        );
        let mut awarded = WORKOUT_BASE_XP;

        if streak > 1 {
            let multiplier = streak.min(STREAK_BONUS_CAP_DAYS) as i64;
            let bonus = STREAK_BONUS_PER_DAY * multiplier;
            self.add_xp(
                XpEventKind::StreakBonus,
                bonus,
                format!("{streak}-day streak bonus"),
                workout_id,
                now,
            );
            awarded += bonus;
        }

        awarded
    }

    /// Re-derive `current_level` and `level_name` from `total_xp`.
    fn relevel(&mut self) {
        let def = level_for_xp(self.total_xp);
        self.current_level = def.level;
        self.level_name = def.name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_xp_never_negative() {
        let mut profile = XpProfile::new();
        let now = Utc::now();

        profile.add_xp(XpEventKind::MissedWorkout, -500, "penalty", None, now);
        assert_eq!(profile.total_xp, 0);

        profile.add_xp(XpEventKind::WorkoutComplete, 100, "workout", None, now);
        profile.add_xp(XpEventKind::MissedWorkout, -1000, "penalty", None, now);
        assert_eq!(profile.total_xp, 0);
    }

    #[test]
    fn test_level_re_derived_after_delta() {
        let mut profile = XpProfile::new();
        let now = Utc::now();

        profile.add_xp(XpEventKind::WorkoutComplete, 450, "workouts", None, now);
        assert_eq!(profile.current_level, 2);

        profile.add_xp(XpEventKind::StreakBrokenLong, -150, "streak broken", None, now);
        assert_eq!(profile.total_xp, 300);
        assert_eq!(profile.current_level, 2);
        assert_eq!(profile.level_name, "Apprentice");
    }

    #[test]
    fn test_penalty_streak_counting() {
        let mut profile = XpProfile::new();
        let now = Utc::now();

        profile.add_xp(XpEventKind::MissedWorkout, -25, "missed", None, now);
        profile.add_xp(XpEventKind::MissedWorkout, -25, "missed", None, now);
        assert_eq!(profile.penalty_streak, 2);

        profile.add_xp(XpEventKind::WorkoutComplete, 100, "workout", None, now);
        assert_eq!(profile.penalty_streak, 0);
    }

    #[test]
    fn test_event_log_capped_fifo() {
        let mut profile = XpProfile::new();
        let now = Utc::now();

        for i in 0..150 {
            profile.add_xp(XpEventKind::WorkoutComplete, 1, format!("w{i}"), None, now);
        }

        assert_eq!(profile.events.len(), EVENT_LOG_CAP);
        assert_eq!(profile.events[0].description, "w50");
        assert_eq!(profile.events.last().unwrap().description, "w149");
    }

    #[test]
    fn test_workout_award_with_streak_bonus() {
        let mut profile = XpProfile::new();
        let now = Utc::now();

        // Streak of 1 earns no bonus
        let awarded = profile.award_workout_xp(None, 1, now);
        assert_eq!(awarded, WORKOUT_BASE_XP);

        // Streak of 3 earns 3x the per-day bonus
        let awarded = profile.award_workout_xp(None, 3, now);
        assert_eq!(awarded, WORKOUT_BASE_XP + 30);

        // Bonus multiplier caps at 7 days
        let awarded = profile.award_workout_xp(None, 12, now);
        assert_eq!(awarded, WORKOUT_BASE_XP + 70);
    }
}
