//! Missed-workout detection, streak-break penalties, and debt resolution.
//!
//! T041: Implement cursor-based missed-workout scan
//! T042: Implement tiered streak-break penalty
//! T043: Implement one-way debt resolution with partial refund
//!
//! The `last_checked_date` cursor on the profile is the only idempotency
//! mechanism here: a workout date is scanned at most once, so re-running
//! the scan on the same day creates no duplicate penalties.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::types::{XpEventKind, XpProfile};
use crate::penalties::types::{
    PenaltyKind, PenaltyRecord, LONG_BREAK_THRESHOLD, MISSED_WORKOUT_XP, STREAK_BREAK_LONG_XP,
    STREAK_BREAK_SHORT_XP,
};
use crate::plan::types::{ScheduledWorkout, WorkoutKind};

/// Scheduled workouts the cursor has not scanned yet that were missed.
///
/// A workout is missed when its date is strictly before `today`, strictly
/// after the cursor, it was never completed, and it is not a rest day.
pub fn missed_candidates<'a>(
    scheduled: &'a [ScheduledWorkout],
    last_checked: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<&'a ScheduledWorkout> {
    scheduled
        .iter()
        .filter(|w| !w.completed && w.kind != WorkoutKind::Rest)
        .filter(|w| w.date < today)
        .filter(|w| last_checked.map_or(true, |cursor| w.date > cursor))
        .collect()
}

/// Scan for missed workouts, debit XP for each, and advance the cursor.
///
/// Returns the newly created penalty records.
pub fn check_missed_workouts(
    profile: &mut XpProfile,
    records: &mut Vec<PenaltyRecord>,
    scheduled: &[ScheduledWorkout],
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<PenaltyRecord> {
    let missed: Vec<ScheduledWorkout> =
        missed_candidates(scheduled, profile.last_checked_date, today)
            .into_iter()
            .cloned()
            .collect();

    let mut new_records = Vec::with_capacity(missed.len());
    for workout in &missed {
        let description = format!("Missed {} workout on {}", workout.kind, workout.date);
        let record = PenaltyRecord::new(
            PenaltyKind::MissedWorkout,
            MISSED_WORKOUT_XP,
            description.clone(),
            Some(workout.date),
            now,
        );
        profile.add_xp(
            XpEventKind::MissedWorkout,
            -MISSED_WORKOUT_XP,
            description,
            Some(workout.id),
            now,
        );
        records.push(record.clone());
        new_records.push(record);
    }

    profile.last_checked_date = Some(today);

    if !new_records.is_empty() {
        tracing::info!(count = new_records.len(), "missed workouts penalized");
    }

    new_records
}

/// Debit XP for a broken streak and record the debt.
///
/// Only called when a streak resets to 1 after previously being above 1.
/// The magnitude is tiered: breaking a streak of [`LONG_BREAK_THRESHOLD`]
/// days or more costs [`STREAK_BREAK_LONG_XP`], shorter streaks cost
/// [`STREAK_BREAK_SHORT_XP`].
pub fn apply_streak_break(
    profile: &mut XpProfile,
    records: &mut Vec<PenaltyRecord>,
    previous_streak: u32,
    now: DateTime<Utc>,
) -> PenaltyRecord {
    let (xp_lost, event_kind) = if previous_streak >= LONG_BREAK_THRESHOLD {
        (STREAK_BREAK_LONG_XP, XpEventKind::StreakBrokenLong)
    } else {
        (STREAK_BREAK_SHORT_XP, XpEventKind::StreakBrokenShort)
    };

    let description = format!("Broke a {previous_streak}-day streak");
    let record = PenaltyRecord::new(PenaltyKind::StreakBroken, xp_lost, description.clone(), None, now);
    profile.add_xp(event_kind, -xp_lost, description, None, now);
    records.push(record.clone());

    tracing::info!(previous_streak, xp_lost, "streak break penalized");
    record
}

/// Mark a penalty resolved and credit half its magnitude back.
///
/// Resolution is one-way; resolving an already-resolved debt is an error.
/// Returns the refunded XP.
pub fn resolve_debt(
    profile: &mut XpProfile,
    records: &mut [PenaltyRecord],
    penalty_id: Uuid,
    now: DateTime<Utc>,
) -> Result<i64, PenaltyError> {
    let record = records
        .iter_mut()
        .find(|r| r.id == penalty_id)
        .ok_or(PenaltyError::NotFound(penalty_id))?;

    if record.resolved {
        return Err(PenaltyError::AlreadyResolved(penalty_id));
    }

    record.resolved = true;
    record.resolved_at = Some(now);

    let refund = record.xp_lost / 2;
    profile.add_xp(
        XpEventKind::DebtResolved,
        refund,
        format!("Resolved debt: {}", record.description),
        None,
        now,
    );

    tracing::info!(%penalty_id, refund, "debt resolved");
    Ok(refund)
}

/// All penalties not yet resolved.
pub fn unresolved_debts(records: &[PenaltyRecord]) -> Vec<&PenaltyRecord> {
    records.iter().filter(|r| !r.resolved).collect()
}

/// Sum of unresolved penalty magnitudes.
pub fn total_debt(records: &[PenaltyRecord]) -> i64 {
    unresolved_debts(records).iter().map(|r| r.xp_lost).sum()
}

/// Penalty tracking errors.
#[derive(Debug, Error)]
pub enum PenaltyError {
    #[error("Penalty not found: {0}")]
    NotFound(Uuid),

    #[error("Penalty already resolved: {0}")]
    AlreadyResolved(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn workout(day: NaiveDate, kind: WorkoutKind, completed: bool) -> ScheduledWorkout {
        ScheduledWorkout {
            id: Uuid::new_v4(),
            date: day,
            kind,
            completed,
            plan_id: None,
        }
    }

    #[test]
    fn test_scan_creates_record_per_missed_workout() {
        let today = date(2026, 8, 28);
        let mut profile = XpProfile::new();
        profile.last_checked_date = Some(today - Duration::days(3));
        let mut records = Vec::new();

        let scheduled = vec![
            workout(today - Duration::days(1), WorkoutKind::Strength, false),
            workout(today - Duration::days(2), WorkoutKind::Cardio, false),
        ];

        let new = check_missed_workouts(&mut profile, &mut records, &scheduled, today, Utc::now());

        assert_eq!(new.len(), 2);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.xp_lost > 0));
        assert_eq!(profile.total_xp, 0);
        assert_eq!(profile.last_checked_date, Some(today));
    }

    #[test]
    fn test_scan_is_idempotent_within_a_day() {
        let today = date(2026, 8, 28);
        let mut profile = XpProfile::new();
        profile.last_checked_date = Some(today - Duration::days(3));
        let mut records = Vec::new();

        let scheduled = vec![
            workout(today - Duration::days(1), WorkoutKind::Strength, false),
            workout(today - Duration::days(2), WorkoutKind::Cardio, false),
        ];

        let now = Utc::now();
        let first = check_missed_workouts(&mut profile, &mut records, &scheduled, today, now);
        let second = check_missed_workouts(&mut profile, &mut records, &scheduled, today, now);

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 0);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_scan_skips_rest_completed_and_future() {
        let today = date(2026, 8, 28);
        let mut profile = XpProfile::new();
        let mut records = Vec::new();

        let scheduled = vec![
            workout(today - Duration::days(1), WorkoutKind::Rest, false),
            workout(today - Duration::days(1), WorkoutKind::Cardio, true),
            workout(today, WorkoutKind::Strength, false),
            workout(today + Duration::days(1), WorkoutKind::Strength, false),
        ];

        let new = check_missed_workouts(&mut profile, &mut records, &scheduled, today, Utc::now());
        assert!(new.is_empty());
    }

    #[test]
    fn test_streak_break_tiers() {
        let mut profile = XpProfile::new();
        let mut records = Vec::new();
        let now = Utc::now();

        let short = apply_streak_break(&mut profile, &mut records, 3, now);
        assert_eq!(short.xp_lost, STREAK_BREAK_SHORT_XP);

        let long = apply_streak_break(&mut profile, &mut records, 7, now);
        assert_eq!(long.xp_lost, STREAK_BREAK_LONG_XP);
        assert_eq!(
            profile.events.last().unwrap().kind,
            XpEventKind::StreakBrokenLong
        );
    }

    #[test]
    fn test_resolve_debt_refunds_half() {
        let mut profile = XpProfile::new();
        let mut records = Vec::new();
        let now = Utc::now();

        let record = apply_streak_break(&mut profile, &mut records, 8, now);
        assert_eq!(total_debt(&records), STREAK_BREAK_LONG_XP);

        let refund = resolve_debt(&mut profile, &mut records, record.id, now).unwrap();
        assert_eq!(refund, STREAK_BREAK_LONG_XP / 2);
        assert_eq!(profile.total_xp, refund);
        assert!(unresolved_debts(&records).is_empty());
        assert_eq!(total_debt(&records), 0);
    }

    #[test]
    fn test_resolution_is_one_way() {
        let mut profile = XpProfile::new();
        let mut records = Vec::new();
        let now = Utc::now();

        let record = apply_streak_break(&mut profile, &mut records, 2, now);
        resolve_debt(&mut profile, &mut records, record.id, now).unwrap();

        let again = resolve_debt(&mut profile, &mut records, record.id, now);
        assert!(matches!(again, Err(PenaltyError::AlreadyResolved(_))));
    }

    #[test]
    fn test_resolve_unknown_debt() {
        let mut profile = XpProfile::new();
        let mut records = Vec::new();

        let result = resolve_debt(&mut profile, &mut records, Uuid::new_v4(), Utc::now());
        assert!(matches!(result, Err(PenaltyError::NotFound(_))));
    }
}
