//! In-memory snapshot of every persisted engine document.
//!
//! T070: Implement snapshot load and single-batch commit
//!
//! A mutating operation loads the snapshot, applies the whole change in
//! memory, and commits every document back in one batch. That batch is
//! the transaction boundary: XP, penalties, quests, plan progress, the
//! calendar, and notifications can never partially apply.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::ledger::types::XpProfile;
use crate::notifications::types::Notification;
use crate::penalties::types::PenaltyRecord;
use crate::plan::types::{PlanProgress, ScheduledWorkout};
use crate::quests::engine::QuestLog;
use crate::storage::store::{load_or_default, to_document, PersistenceStore, StoreError};

pub(crate) const KEY_XP_PROFILE: &str = "xp_profile";
pub(crate) const KEY_PENALTIES: &str = "penalties";
pub(crate) const KEY_QUEST_LOG: &str = "quest_log";
pub(crate) const KEY_PLAN_PROGRESS: &str = "plan_progress";
pub(crate) const KEY_SCHEDULED_WORKOUTS: &str = "scheduled_workouts";
pub(crate) const KEY_NOTIFICATIONS: &str = "notifications";

/// All engine state, loaded together and committed together.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    /// XP ledger document
    pub profile: XpProfile,
    /// Penalty record document
    pub penalties: Vec<PenaltyRecord>,
    /// Quest document
    pub quest_log: QuestLog,
    /// Plan progress document, keyed by plan id
    pub plans: BTreeMap<Uuid, PlanProgress>,
    /// Scheduled workout calendar document
    pub scheduled: Vec<ScheduledWorkout>,
    /// Notification document
    pub notifications: Vec<Notification>,
}

impl EngineSnapshot {
    /// Load every document, defaulting any that does not exist yet.
    pub fn load<S: PersistenceStore>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            profile: load_or_default(store, KEY_XP_PROFILE)?,
            penalties: load_or_default(store, KEY_PENALTIES)?,
            quest_log: load_or_default(store, KEY_QUEST_LOG)?,
            plans: load_or_default(store, KEY_PLAN_PROGRESS)?,
            scheduled: load_or_default(store, KEY_SCHEDULED_WORKOUTS)?,
            notifications: load_or_default(store, KEY_NOTIFICATIONS)?,
        })
    }

    /// Commit every document in one atomic batch.
    pub fn commit<S: PersistenceStore>(&self, store: &mut S) -> Result<(), StoreError> {
        let docs = [
            (KEY_XP_PROFILE, to_document(&self.profile)?),
            (KEY_PENALTIES, to_document(&self.penalties)?),
            (KEY_QUEST_LOG, to_document(&self.quest_log)?),
            (KEY_PLAN_PROGRESS, to_document(&self.plans)?),
            (KEY_SCHEDULED_WORKOUTS, to_document(&self.scheduled)?),
            (KEY_NOTIFICATIONS, to_document(&self.notifications)?),
        ];
        store.put_many(&docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_load_from_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let snapshot = EngineSnapshot::load(&store).unwrap();

        assert_eq!(snapshot.profile.total_xp, 0);
        assert!(snapshot.penalties.is_empty());
        assert!(snapshot.quest_log.quests.is_empty());
        assert!(snapshot.plans.is_empty());
    }

    #[test]
    fn test_commit_then_reload_roundtrip() {
        let mut store = MemoryStore::new();
        let mut snapshot = EngineSnapshot::load(&store).unwrap();

        snapshot.profile.add_xp(
            crate::ledger::types::XpEventKind::WorkoutComplete,
            100,
            "workout",
            None,
            chrono::Utc::now(),
        );
        snapshot.commit(&mut store).unwrap();

        let reloaded = EngineSnapshot::load(&store).unwrap();
        assert_eq!(reloaded.profile.total_xp, 100);
        assert_eq!(reloaded.profile.events.len(), 1);
    }
}
