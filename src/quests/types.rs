//! Quest and objective type definitions.
//!
//! T050: Define Quest, QuestObjective, and QuestTemplate
//! T051: Implement clamped objective progress

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of measurable objective inside a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// Count of workouts for the quest's body part
    Workout,
    /// Days the protein target was met
    Nutrition,
    /// Length of the user's current streak
    Streak,
    /// Days the water target was reached
    Hydration,
    /// Nights with enough sleep
    Recovery,
}

impl ObjectiveKind {
    /// Get display name for the objective kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectiveKind::Workout => "Workout",
            ObjectiveKind::Nutrition => "Nutrition",
            ObjectiveKind::Streak => "Streak",
            ObjectiveKind::Hydration => "Hydration",
            ObjectiveKind::Recovery => "Recovery",
        }
    }
}

impl std::fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Quest difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Status of a quest; terminal once no longer active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// Quest is being tracked
    #[default]
    Active,
    /// All objectives were fulfilled and the reward claimed
    Completed,
    /// Quest was given up
    Abandoned,
}

impl QuestStatus {
    /// Whether the quest is still being tracked.
    pub fn is_active(&self) -> bool {
        matches!(self, QuestStatus::Active)
    }
}

/// A measurable sub-goal of a quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestObjective {
    /// Unique identifier
    pub id: Uuid,
    /// Kind of objective
    pub kind: ObjectiveKind,
    /// Display title
    pub title: String,
    /// Target value to reach
    pub target: u32,
    /// Current value, clamped to [0, target]
    pub current: u32,
    /// Unit label for the UI
    pub unit: String,
    /// XP contribution toward the quest reward
    pub xp_reward: i64,
    /// Whether the target has been reached
    pub completed: bool,
    /// Specific exercises this objective tracks, if any
    pub linked_exercise_ids: Option<Vec<String>>,
}

impl QuestObjective {
    /// Advance progress by `amount`, clamping at the target.
    ///
    /// No-op on an already-completed objective.
    pub fn advance(&mut self, amount: u32) {
        if self.completed {
            return;
        }
        self.current = (self.current + amount).min(self.target);
        self.completed = self.current >= self.target;
    }

    /// Set progress to `value`, clamping at the target.
    ///
    /// No-op on an already-completed objective.
    pub fn set_progress(&mut self, value: u32) {
        if self.completed {
            return;
        }
        self.current = value.min(self.target);
        self.completed = self.current >= self.target;
    }
}

/// Template shape of an objective inside the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveTemplate {
    /// Kind of objective
    pub kind: ObjectiveKind,
    /// Display title
    pub title: String,
    /// Target value
    pub target: u32,
    /// Unit label
    pub unit: String,
    /// XP contribution
    pub xp_reward: i64,
    /// Specific exercises tracked, if any
    pub linked_exercise_ids: Option<Vec<String>>,
}

/// A catalog entry a quest can be instantiated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestTemplate {
    /// Stable catalog slug
    pub id: String,
    /// Body part the quest trains
    pub body_part_id: String,
    /// Display title; also the deduplication key against active quests
    pub title: String,
    /// Longer description
    pub description: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Reward for completing the whole quest
    pub xp_reward: i64,
    /// Days from acceptance to deadline
    pub duration_days: i64,
    /// Objectives the quest starts with
    pub objectives: Vec<ObjectiveTemplate>,
}

/// A user-accepted, time-boxed set of objectives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier
    pub id: Uuid,
    /// Body part the quest trains
    pub body_part_id: String,
    /// Display title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Current status
    pub status: QuestStatus,
    /// When the quest was accepted
    pub created_at: DateTime<Utc>,
    /// When the quest was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Reward for completing the whole quest
    pub xp_reward: i64,
    /// Days from acceptance to deadline
    pub duration_days: i64,
    /// Last day the quest counts
    pub deadline_date: NaiveDate,
    /// Objectives being tracked
    pub objectives: Vec<QuestObjective>,
}

impl Quest {
    /// Instantiate a quest from a catalog template.
    pub fn from_template(template: &QuestTemplate, now: DateTime<Utc>) -> Self {
        let objectives = template
            .objectives
            .iter()
            .map(|o| QuestObjective {
                id: Uuid::new_v4(),
                kind: o.kind,
                title: o.title.clone(),
                target: o.target,
                current: 0,
                unit: o.unit.clone(),
                xp_reward: o.xp_reward,
                completed: false,
                linked_exercise_ids: o.linked_exercise_ids.clone(),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            body_part_id: template.body_part_id.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            difficulty: template.difficulty,
            status: QuestStatus::Active,
            created_at: now,
            completed_at: None,
            xp_reward: template.xp_reward,
            duration_days: template.duration_days,
            deadline_date: (now + Duration::days(template.duration_days)).date_naive(),
            objectives,
        }
    }

    /// Whether every objective has reached its target.
    pub fn is_fulfilled(&self) -> bool {
        self.objectives.iter().all(|o| o.completed)
    }
}

/// Daily metrics snapshot feeding automatic objective progress.
#[derive(Debug, Clone, Copy)]
pub struct DailyMetrics {
    /// Current workout streak in days
    pub streak: u32,
    /// Percentage of the daily water target reached
    pub water_percentage: u32,
    /// Hours slept last night
    pub sleep_hours: f32,
    /// Whether the protein target was met
    pub protein_met: bool,
}
