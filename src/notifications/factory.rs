//! Pure factory functions turning engine state into notifications.
//!
//! T061: Implement the notification factories
//!
//! Every factory is deterministic given its inputs, apart from the fresh
//! id and timestamp on the produced record.

use crate::notifications::types::{Notification, NotificationKind, Priority};
use crate::plan::types::{PlanProgress, ScheduledWorkout};

/// Reminder for an upcoming workout; high priority inside two hours.
pub fn reminder(workout: &ScheduledWorkout, hours_until: i64) -> Notification {
    let priority = if hours_until <= 2 {
        Priority::High
    } else {
        Priority::Medium
    };

    Notification::new(
        NotificationKind::Reminder,
        "Workout coming up",
        format!(
            "{} workout scheduled for {} ({hours_until}h from now)",
            workout.kind, workout.date
        ),
        priority,
    )
    .with_workout(workout.id)
    .with_action_url(format!("fitquest://workouts/{}", workout.id))
}

/// Warning about missed workouts; `None` when the list is empty.
pub fn missed_warning(missed: &[ScheduledWorkout]) -> Option<Notification> {
    if missed.is_empty() {
        return None;
    }

    let message = if missed.len() == 1 {
        format!("You missed your {} workout on {}", missed[0].kind, missed[0].date)
    } else {
        format!("You missed {} scheduled workouts", missed.len())
    };

    Some(Notification::new(
        NotificationKind::Warning,
        "Missed workouts",
        message,
        Priority::High,
    ))
}

/// Record of an XP debit just applied.
pub fn penalty(xp_lost: i64, reason: &str) -> Notification {
    Notification::new(
        NotificationKind::Penalty,
        format!("-{xp_lost} XP"),
        reason.to_string(),
        Priority::High,
    )
}

/// Standing-debt summary.
pub fn debt_warning(debt_count: usize, total_debt: i64) -> Notification {
    Notification::new(
        NotificationKind::Warning,
        "Outstanding XP debt",
        format!("{debt_count} unresolved penalties totaling {total_debt} XP. Complete extra workouts to pay them down."),
        Priority::Medium,
    )
    .with_action_url("fitquest://debts")
}

/// Warning that penalties pushed the user down a level.
pub fn degradation_warning(level: u32, level_name: &str) -> Notification {
    Notification::new(
        NotificationKind::Warning,
        "Level lost",
        format!("Penalties dropped you to level {level} ({level_name})"),
        Priority::High,
    )
}

/// Milestone-reached celebration.
pub fn milestone(name: &str, description: &str, plan_id: uuid::Uuid) -> Notification {
    Notification::new(
        NotificationKind::Milestone,
        format!("Milestone: {name}"),
        description.to_string(),
        Priority::Medium,
    )
    .with_plan(plan_id)
}

/// Progress summary bucketed by completion rate.
pub fn progress_update(progress: &PlanProgress) -> Notification {
    let rate = progress.completion_rate;
    let message = if rate >= 75.0 {
        format!("You're crushing it! {rate:.0}% of the plan done.")
    } else if rate >= 50.0 {
        format!("Over halfway there: {rate:.0}% complete. Keep the streak alive!")
    } else if rate >= 25.0 {
        format!("Solid start: {rate:.0}% of the plan complete.")
    } else {
        format!("Every workout counts. {rate:.0}% done so far.")
    };

    Notification::new(NotificationKind::Progress, "Plan progress", message, Priority::Low)
        .with_plan(progress.plan_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::types::WorkoutKind;
    use crate::storage::EngineConfig;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_workout() -> ScheduledWorkout {
        ScheduledWorkout {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            kind: WorkoutKind::Strength,
            completed: false,
            plan_id: None,
        }
    }

    #[test]
    fn test_reminder_priority_threshold() {
        let workout = sample_workout();
        assert_eq!(reminder(&workout, 2).priority, Priority::High);
        assert_eq!(reminder(&workout, 3).priority, Priority::Medium);
        assert_eq!(reminder(&workout, 1).workout_id, Some(workout.id));
        assert_eq!(
            reminder(&workout, 1).action_url,
            Some(format!("fitquest://workouts/{}", workout.id))
        );
    }

    #[test]
    fn test_missed_warning_empty_is_none() {
        assert!(missed_warning(&[]).is_none());
        assert!(missed_warning(&[sample_workout()]).is_some());
    }

    #[test]
    fn test_progress_update_buckets() {
        let mut progress = PlanProgress::start(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            &EngineConfig::default(),
        );

        progress.completion_rate = 80.0;
        assert!(progress_update(&progress).message.contains("crushing"));

        progress.completion_rate = 55.0;
        assert!(progress_update(&progress).message.contains("halfway"));

        progress.completion_rate = 30.0;
        assert!(progress_update(&progress).message.contains("Solid start"));

        progress.completion_rate = 10.0;
        assert!(progress_update(&progress).message.contains("counts"));
    }

    #[test]
    fn test_penalty_and_debt_warning_text() {
        let note = penalty(25, "Missed Strength workout on 2026-08-27");
        assert_eq!(note.title, "-25 XP");

        let note = debt_warning(3, 125);
        assert!(note.message.contains("3 unresolved"));
        assert!(note.message.contains("125 XP"));
        assert_eq!(note.action_url.as_deref(), Some("fitquest://debts"));
    }
}
