//! Engine state surviving a process restart through the SQLite store.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use fitquest_engine::engine::ProgressionEngine;
use fitquest_engine::plan::types::WorkoutCompletion;
use fitquest_engine::storage::SqliteStore;

#[test]
fn test_engine_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("progress.db");
    let now = Utc.with_ymd_and_hms(2026, 8, 24, 18, 0, 0).unwrap();
    let plan_id = Uuid::new_v4();

    {
        let store = SqliteStore::open(&db_path).unwrap();
        let mut engine = ProgressionEngine::new(store);

        engine.accept_quest_at("chest-week", now).unwrap();
        engine
            .complete_workout_at(
                &WorkoutCompletion {
                    workout_id: Uuid::new_v4(),
                    plan_id,
                    date: now.date_naive(),
                    exercises: vec!["Push-Up".to_string()],
                },
                now,
            )
            .unwrap();
    }

    // Reopen as a fresh process would
    let store = SqliteStore::open(&db_path).unwrap();
    let engine = ProgressionEngine::new(store);

    let profile = engine.profile().unwrap();
    assert_eq!(profile.total_xp, 100);
    assert_eq!(profile.events.len(), 1);

    let quests = engine.active_quests().unwrap();
    assert_eq!(quests.len(), 1);
    let workout_objective = quests[0]
        .objectives
        .iter()
        .find(|o| o.title.contains("chest workouts"))
        .unwrap();
    assert_eq!(workout_objective.current, 1);

    let progress = engine.plan_progress(plan_id).unwrap().unwrap();
    assert_eq!(progress.completed_workouts, 1);
    assert!(!engine.unread_notifications().unwrap().is_empty());
}

#[test]
fn test_nested_directories_created_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("deep").join("nested").join("progress.db");

    let store = SqliteStore::open(&db_path).unwrap();
    drop(store);
    assert!(db_path.exists());
}
