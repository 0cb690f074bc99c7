//! Missed-workout scanning and debt resolution through the engine.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use fitquest_engine::engine::ProgressionEngine;
use fitquest_engine::notifications::types::NotificationKind;
use fitquest_engine::plan::types::{ScheduledWorkout, WorkoutKind};
use fitquest_engine::quests::types::DailyMetrics;
use fitquest_engine::storage::MemoryStore;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scheduled(day: NaiveDate, kind: WorkoutKind) -> ScheduledWorkout {
    ScheduledWorkout {
        id: Uuid::new_v4(),
        date: day,
        kind,
        completed: false,
        plan_id: None,
    }
}

fn quiet_metrics() -> DailyMetrics {
    DailyMetrics {
        streak: 0,
        water_percentage: 0,
        sleep_hours: 0.0,
        protein_met: false,
    }
}

#[test]
fn test_missed_scan_finds_two_then_none_same_day() {
    let mut engine = ProgressionEngine::new(MemoryStore::new());

    // Establish the cursor three days back with an empty calendar
    engine
        .run_daily_check_at(&quiet_metrics(), at(2026, 8, 25))
        .unwrap();

    // Two incomplete workouts: yesterday and two days ago
    engine
        .set_scheduled_workouts(vec![
            scheduled(date(2026, 8, 27), WorkoutKind::Strength),
            scheduled(date(2026, 8, 26), WorkoutKind::Cardio),
        ])
        .unwrap();

    let today = at(2026, 8, 28);
    let first = engine.run_daily_check_at(&quiet_metrics(), today).unwrap();
    assert_eq!(first.new_penalties.len(), 2);
    assert!(first.new_penalties.iter().all(|p| p.xp_lost > 0));

    let profile = engine.profile().unwrap();
    assert_eq!(profile.last_checked_date, Some(today.date_naive()));

    // Immediate second call the same day: the cursor makes it a no-op
    let second = engine.run_daily_check_at(&quiet_metrics(), today).unwrap();
    assert!(second.new_penalties.is_empty());
    assert_eq!(engine.penalties().unwrap().len(), 2);
}

#[test]
fn test_missed_scan_emits_penalty_and_warning_notifications() {
    let mut engine = ProgressionEngine::new(MemoryStore::new());
    engine
        .set_scheduled_workouts(vec![scheduled(date(2026, 8, 27), WorkoutKind::Strength)])
        .unwrap();

    engine
        .run_daily_check_at(&quiet_metrics(), at(2026, 8, 28))
        .unwrap();

    let notifications = engine.unread_notifications().unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Penalty));
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Warning && n.title == "Missed workouts"));
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Warning && n.title == "Outstanding XP debt"));
}

#[test]
fn test_rest_days_are_never_penalized() {
    let mut engine = ProgressionEngine::new(MemoryStore::new());
    engine
        .set_scheduled_workouts(vec![
            scheduled(date(2026, 8, 26), WorkoutKind::Rest),
            scheduled(date(2026, 8, 27), WorkoutKind::Rest),
        ])
        .unwrap();

    let summary = engine
        .run_daily_check_at(&quiet_metrics(), at(2026, 8, 28))
        .unwrap();
    assert!(summary.new_penalties.is_empty());
    assert_eq!(engine.total_debt().unwrap(), 0);
}

#[test]
fn test_resolve_debt_refunds_half_and_is_one_way() {
    let mut engine = ProgressionEngine::new(MemoryStore::new());
    engine
        .set_scheduled_workouts(vec![scheduled(date(2026, 8, 27), WorkoutKind::Hiit)])
        .unwrap();

    let now = at(2026, 8, 28);
    let summary = engine.run_daily_check_at(&quiet_metrics(), now).unwrap();
    let penalty_id = summary.new_penalties[0].id;
    let magnitude = summary.new_penalties[0].xp_lost;

    assert_eq!(engine.total_debt().unwrap(), magnitude);

    let refund = engine.resolve_debt_at(penalty_id, now).unwrap();
    assert_eq!(refund, magnitude / 2);
    assert_eq!(engine.total_debt().unwrap(), 0);
    assert!(engine.unresolved_debts().unwrap().is_empty());

    let profile = engine.profile().unwrap();
    assert_eq!(profile.total_xp, refund);

    // Resolution is one-way
    assert!(engine.resolve_debt_at(penalty_id, now).is_err());
}

#[test]
fn test_daily_check_warns_when_penalties_drop_the_level() {
    let mut engine = ProgressionEngine::new(MemoryStore::new());
    let seed_day = at(2026, 8, 24);

    // Two 150 quest rewards put the profile at 300 XP, one level up
    for template in ["chest-week", "core-commitment"] {
        let quest_id = engine.accept_quest_at(template, seed_day).unwrap();
        engine.complete_quest_at(quest_id, seed_day).unwrap();
    }
    assert_eq!(engine.profile().unwrap().level_name, "Apprentice");

    // Three missed workouts debit 75 XP with no award to mask the drop
    engine
        .set_scheduled_workouts(vec![
            scheduled(date(2026, 8, 25), WorkoutKind::Strength),
            scheduled(date(2026, 8, 26), WorkoutKind::Cardio),
            scheduled(date(2026, 8, 27), WorkoutKind::Hiit),
        ])
        .unwrap();

    let summary = engine
        .run_daily_check_at(&quiet_metrics(), at(2026, 8, 28))
        .unwrap();
    assert_eq!(summary.new_penalties.len(), 3);

    let profile = engine.profile().unwrap();
    assert_eq!(profile.total_xp, 225);
    assert_eq!(profile.level_name, "Novice");

    assert!(engine
        .unread_notifications()
        .unwrap()
        .iter()
        .any(|n| n.kind == NotificationKind::Warning && n.title == "Level lost"));
}

#[test]
fn test_total_xp_never_negative_under_penalties() {
    let mut engine = ProgressionEngine::new(MemoryStore::new());

    let workouts: Vec<ScheduledWorkout> = (20..28)
        .map(|d| scheduled(date(2026, 8, d), WorkoutKind::Strength))
        .collect();
    engine.set_scheduled_workouts(workouts).unwrap();

    engine
        .run_daily_check_at(&quiet_metrics(), at(2026, 8, 28))
        .unwrap();

    let profile = engine.profile().unwrap();
    assert_eq!(profile.total_xp, 0);
    assert_eq!(profile.penalty_streak, 8);
}
