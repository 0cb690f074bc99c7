//! Catalog-driven quest engine.

pub mod catalog;
pub mod engine;
pub mod types;

pub use catalog::{builtin_templates, BodyPart, Catalog, ExerciseRef};
pub use engine::{QuestError, QuestLog};
pub use types::{
    DailyMetrics, Difficulty, ObjectiveKind, ObjectiveTemplate, Quest, QuestObjective,
    QuestStatus, QuestTemplate,
};
