//! FitQuest Progression & Accountability Engine
//!
//! Turns "a workout happened" (or didn't) into experience points, levels,
//! streaks, penalties and debts, quest objective progress, plan milestones,
//! and user-facing notifications. A single workout completion fans out
//! through the XP ledger, the penalty tracker, the plan tracker, and the
//! quest engine, then commits every touched document as one batch.
//!
//! State lives in JSON documents behind the [`storage::PersistenceStore`]
//! trait; [`engine::ProgressionEngine`] is the single service boundary the
//! UI layer talks to.

pub mod engine;
pub mod ledger;
pub mod logging;
pub mod notifications;
pub mod penalties;
pub mod plan;
pub mod quests;
pub mod storage;

// Re-export commonly used types
pub use engine::{CompletionSummary, EngineError, ProgressionEngine};
pub use ledger::{XpEvent, XpEventKind, XpProfile};
pub use plan::{PlanProgress, ScheduledWorkout, WorkoutCompletion, WorkoutKind};
pub use quests::{DailyMetrics, Quest, QuestStatus};
pub use storage::{EngineConfig, MemoryStore, PersistenceStore, SqliteStore};
