//! Streak arithmetic and plan progress updates.
//!
//! T032: Implement day-difference streak calculation
//! T033: Implement per-completion plan progress update with milestones

use chrono::{DateTime, NaiveDate, Utc};

use crate::plan::types::{MilestoneKind, PlanMilestone, PlanPhase, PlanProgress};

/// Compute the streak after a workout on `new_date`.
///
/// A same-day re-completion leaves the streak unchanged, the next calendar
/// day extends it, and any larger gap resets it to 1.
pub fn next_streak(new_date: NaiveDate, last_date: Option<NaiveDate>, current: u32) -> u32 {
    let Some(last) = last_date else {
        return 1;
    };

    let diff = (new_date - last).num_days();
    match diff {
        0 => current.max(1),
        1 => current + 1,
        _ => 1,
    }
}

/// What changed when a completion was recorded against a plan.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    /// Streak before this completion
    pub previous_streak: u32,
    /// Streak after this completion
    pub new_streak: u32,
    /// True when the streak reset from above 1
    pub streak_broken: bool,
    /// Milestones newly completed by this workout
    pub completed_milestones: Vec<PlanMilestone>,
}

impl PlanProgress {
    /// Fold one completed workout into the plan's running state.
    ///
    /// Updates streaks, counts, the week bucket, the overall completion
    /// rate, the phase, and milestone completion. The caller applies any
    /// streak-break penalty and XP award from the returned outcome.
    pub fn record_completion(
        &mut self,
        date: NaiveDate,
        default_scheduled_per_week: u32,
        default_total_scheduled: u32,
        now: DateTime<Utc>,
    ) -> CompletionOutcome {
        let previous_streak = self.current_streak;
        let new_streak = next_streak(date, self.last_workout_date, previous_streak);
        let streak_broken = previous_streak > 1 && new_streak == 1;

        self.current_streak = new_streak;
        self.longest_streak = self.longest_streak.max(new_streak);
        self.completed_workouts += 1;
        self.last_workout_date = Some(date);
        self.last_activity_date = Some(date);

        self.current_week = self.week_for(date);
        self.update_week_bucket(default_scheduled_per_week);
        self.update_completion_rate(default_total_scheduled);
        self.current_phase = self.phase_for_week(self.current_week);

        let completed_milestones = self.evaluate_milestones(now);

        tracing::debug!(
            plan = %self.plan_id,
            streak = new_streak,
            completed = self.completed_workouts,
            week = self.current_week,
            "plan progress updated"
        );

        CompletionOutcome {
            previous_streak,
            new_streak,
            streak_broken,
            completed_milestones,
        }
    }

    /// Week number for a date, clamped to [1, total_weeks].
    fn week_for(&self, date: NaiveDate) -> u32 {
        let days = (date - self.start_date).num_days();
        if days <= 0 {
            return 1;
        }
        let week = ((days + 6) / 7) as u32;
        week.clamp(1, self.total_weeks.max(1))
    }

    fn update_week_bucket(&mut self, default_scheduled: u32) {
        let week = self.current_week;
        if !self.weekly_progress.iter().any(|w| w.week == week) {
            self.weekly_progress.push(crate::plan::types::WeekProgress {
                week,
                scheduled: default_scheduled,
                completed: 0,
                completion_rate: 0.0,
            });
        }

        if let Some(bucket) = self.weekly_progress.iter_mut().find(|w| w.week == week) {
            bucket.completed += 1;
            let scheduled = if bucket.scheduled == 0 {
                default_scheduled.max(1)
            } else {
                bucket.scheduled
            };
            bucket.completion_rate =
                ((bucket.completed as f32 / scheduled as f32) * 100.0).min(100.0);
        }
    }

    fn update_completion_rate(&mut self, default_total: u32) {
        let total = if self.total_scheduled_workouts == 0 {
            default_total.max(1)
        } else {
            self.total_scheduled_workouts
        };
        self.completion_rate = (self.completed_workouts as f32 / total as f32) * 100.0;
    }

    fn phase_for_week(&self, week: u32) -> PlanPhase {
        let total = self.total_weeks.max(1);
        if week * 3 <= total {
            PlanPhase::Foundation
        } else if week * 3 <= total * 2 {
            PlanPhase::Build
        } else {
            PlanPhase::Peak
        }
    }

    /// Check every incomplete milestone against its predicate.
    ///
    /// Completion is one-way; already-completed milestones are never
    /// re-evaluated. An unrecognized predicate simply never fires.
    fn evaluate_milestones(&mut self, now: DateTime<Utc>) -> Vec<PlanMilestone> {
        let completed_workouts = self.completed_workouts;
        let streak = self.current_streak;
        let mut newly_completed = Vec::new();

        for milestone in self.milestones.iter_mut().filter(|m| !m.completed) {
            let met = match milestone.kind {
                MilestoneKind::Completion => completed_workouts >= milestone.target_workouts,
                MilestoneKind::Streak => milestone
                    .target_streak_days
                    .map_or(false, |target| streak >= target),
                // Placeholder rule carried over from the original tracker:
                // mastery milestones complete on first evaluation.
                MilestoneKind::ExerciseMastery => true,
            };

            if met {
                milestone.completed = true;
                milestone.completed_at = Some(now);
                newly_completed.push(milestone.clone());
            }
        }

        newly_completed
    }
}
