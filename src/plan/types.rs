//! Plan progress type definitions.
//!
//! T030: Define ScheduledWorkout and WorkoutCompletion
//! T031: Define PlanProgress, WeekProgress, and PlanMilestone

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::EngineConfig;

/// Category of a scheduled workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    /// Resistance training
    Strength,
    /// Aerobic training
    Cardio,
    /// Stretching and mobility
    Flexibility,
    /// High-intensity intervals
    Hiit,
    /// Scheduled rest day, never penalized
    Rest,
}

impl WorkoutKind {
    /// Get display name for the workout kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutKind::Strength => "Strength",
            WorkoutKind::Cardio => "Cardio",
            WorkoutKind::Flexibility => "Flexibility",
            WorkoutKind::Hiit => "HIIT",
            WorkoutKind::Rest => "Rest",
        }
    }
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A calendar entry the engine reads for penalty scans and marks completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    /// Unique identifier
    pub id: Uuid,
    /// Calendar date the workout is scheduled for
    pub date: NaiveDate,
    /// Workout category
    pub kind: WorkoutKind,
    /// Whether the workout was completed
    pub completed: bool,
    /// Plan this workout belongs to, if any
    pub plan_id: Option<Uuid>,
}

/// Input describing a workout the user just finished.
#[derive(Debug, Clone)]
pub struct WorkoutCompletion {
    /// The scheduled workout being completed
    pub workout_id: Uuid,
    /// The active plan the workout belongs to
    pub plan_id: Uuid,
    /// Calendar date of the completion
    pub date: NaiveDate,
    /// Names or catalog ids of the exercises performed
    pub exercises: Vec<String>,
}

/// Kind of plan milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    /// Reached a number of completed workouts
    Completion,
    /// Held a streak for a number of days
    Streak,
    /// Mastered a set of exercises
    ExerciseMastery,
}

/// A plan-scoped checkpoint evaluated after each workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMilestone {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// What the milestone rewards
    pub description: String,
    /// Week by which the milestone is expected
    pub target_week: u32,
    /// Completed-workout count required (completion milestones)
    pub target_workouts: u32,
    /// Kind of milestone
    pub kind: MilestoneKind,
    /// Streak length required (streak milestones)
    pub target_streak_days: Option<u32>,
    /// Exercises to master (mastery milestones)
    pub target_exercise_ids: Option<Vec<String>>,
    /// Whether the milestone has been reached; never un-sets
    pub completed: bool,
    /// When the milestone was reached
    pub completed_at: Option<DateTime<Utc>>,
}

/// Completion for one calendar week of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekProgress {
    /// Week number within the plan (1-based)
    pub week: u32,
    /// Workouts scheduled that week
    pub scheduled: u32,
    /// Workouts completed that week
    pub completed: u32,
    /// Completion percentage, capped at 100
    pub completion_rate: f32,
}

/// Phase of the plan derived from the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPhase {
    /// Opening third of the plan
    #[default]
    Foundation,
    /// Middle third
    Build,
    /// Final third
    Peak,
}

impl std::fmt::Display for PlanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanPhase::Foundation => write!(f, "Foundation"),
            PlanPhase::Build => write!(f, "Build"),
            PlanPhase::Peak => write!(f, "Peak"),
        }
    }
}

/// Status of plan tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan is being tracked
    #[default]
    Active,
    /// Plan finished
    Completed,
    /// Plan abandoned
    Abandoned,
}

/// Running tally of adherence to an activated workout plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanProgress {
    /// Plan this progress belongs to
    pub plan_id: Uuid,
    /// Date tracking started
    pub start_date: NaiveDate,
    /// Current week within the plan, clamped to [1, total_weeks]
    pub current_week: u32,
    /// Plan length in weeks
    pub total_weeks: u32,
    /// Total workouts completed under this plan
    pub completed_workouts: u32,
    /// Total workouts the plan schedules
    pub total_scheduled_workouts: u32,
    /// Consecutive days with a completed workout
    pub current_streak: u32,
    /// Highest streak ever reached; monotonic
    pub longest_streak: u32,
    /// Date of the most recent completed workout
    pub last_workout_date: Option<NaiveDate>,
    /// Per-week completion buckets
    pub weekly_progress: Vec<WeekProgress>,
    /// Plan checkpoints
    pub milestones: Vec<PlanMilestone>,
    /// Phase derived from the current week
    pub current_phase: PlanPhase,
    /// Tracking status
    pub status: PlanStatus,
    /// Overall completion percentage
    pub completion_rate: f32,
    /// Last date any activity was recorded
    pub last_activity_date: Option<NaiveDate>,
}

impl PlanProgress {
    /// Lazily initialize progress for a plan on its first completed workout.
    pub fn start(plan_id: Uuid, start_date: NaiveDate, config: &EngineConfig) -> Self {
        Self {
            plan_id,
            start_date,
            current_week: 1,
            total_weeks: config.default_total_weeks,
            completed_workouts: 0,
            total_scheduled_workouts: config.default_total_scheduled_workouts,
            current_streak: 0,
            longest_streak: 0,
            last_workout_date: None,
            weekly_progress: Vec::new(),
            milestones: default_milestones(),
            current_phase: PlanPhase::Foundation,
            status: PlanStatus::Active,
            completion_rate: 0.0,
            last_activity_date: None,
        }
    }
}

/// The three milestones every lazily-created plan starts with.
pub fn default_milestones() -> Vec<PlanMilestone> {
    vec![
        PlanMilestone {
            id: Uuid::new_v4(),
            name: "First Steps".to_string(),
            description: "Complete 5 workouts".to_string(),
            target_week: 2,
            target_workouts: 5,
            kind: MilestoneKind::Completion,
            target_streak_days: None,
            target_exercise_ids: None,
            completed: false,
            completed_at: None,
        },
        PlanMilestone {
            id: Uuid::new_v4(),
            name: "Momentum".to_string(),
            description: "Hold a 7-day streak".to_string(),
            target_week: 4,
            target_workouts: 0,
            kind: MilestoneKind::Streak,
            target_streak_days: Some(7),
            target_exercise_ids: None,
            completed: false,
            completed_at: None,
        },
        PlanMilestone {
            id: Uuid::new_v4(),
            name: "Form Master".to_string(),
            description: "Master the plan's core lifts".to_string(),
            target_week: 6,
            target_workouts: 0,
            kind: MilestoneKind::ExerciseMastery,
            target_streak_days: None,
            target_exercise_ids: Some(vec!["squat".to_string(), "deadlift".to_string()]),
            completed: false,
            completed_at: None,
        },
    ]
}
