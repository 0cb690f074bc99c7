//! Streak and plan progress tracking.

pub mod tracker;
pub mod types;

pub use tracker::{next_streak, CompletionOutcome};
pub use types::{
    MilestoneKind, PlanMilestone, PlanPhase, PlanProgress, PlanStatus, ScheduledWorkout,
    WeekProgress, WorkoutCompletion, WorkoutKind,
};
