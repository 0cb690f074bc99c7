//! Quest lifecycle and objective progression.
//!
//! T054: Implement QuestLog with acceptance and terminal transitions
//! T055: Implement workout-driven and metrics-driven objective progress

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::quests::types::{
    DailyMetrics, ObjectiveKind, Quest, QuestObjective, QuestStatus, QuestTemplate,
};

/// The persisted quest document: all quests plus the auto-progress cursor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestLog {
    /// Every quest ever accepted
    pub quests: Vec<Quest>,
    /// Last day the metrics-driven auto progress ran
    pub last_auto_progress_date: Option<NaiveDate>,
}

impl QuestLog {
    /// Quests still being tracked.
    pub fn active_quests(&self) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.status.is_active()).collect()
    }

    /// Quests that reached completion.
    pub fn completed_quests(&self) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| q.status == QuestStatus::Completed)
            .collect()
    }

    /// Templates not represented by an active quest.
    ///
    /// Deduplication is by title, so two templates sharing a title can
    /// never both be active.
    pub fn available_templates<'a>(
        &self,
        templates: &'a [QuestTemplate],
    ) -> Vec<&'a QuestTemplate> {
        templates
            .iter()
            .filter(|t| {
                !self
                    .quests
                    .iter()
                    .any(|q| q.status.is_active() && q.title == t.title)
            })
            .collect()
    }

    /// Accept a template as a new active quest.
    pub fn accept(&mut self, template: &QuestTemplate, now: DateTime<Utc>) -> Uuid {
        let quest = Quest::from_template(template, now);
        let quest_id = quest.id;

        tracing::info!(quest = %quest_id, title = %quest.title, "quest accepted");
        self.quests.push(quest);
        quest_id
    }

    /// Manually advance one objective, clamped at its target.
    pub fn increment_objective(
        &mut self,
        quest_id: Uuid,
        objective_id: Uuid,
        amount: u32,
    ) -> Result<&QuestObjective, QuestError> {
        let quest = self.active_quest_mut(quest_id)?;
        let objective = quest
            .objectives
            .iter_mut()
            .find(|o| o.id == objective_id)
            .ok_or(QuestError::ObjectiveNotFound {
                quest: quest_id,
                objective: objective_id,
            })?;

        objective.advance(amount);
        Ok(objective)
    }

    /// Advance workout objectives of every active quest for a body part.
    pub fn progress_workout_objectives(&mut self, body_part_id: &str) {
        for quest in self
            .quests
            .iter_mut()
            .filter(|q| q.status.is_active() && q.body_part_id == body_part_id)
        {
            for objective in quest
                .objectives
                .iter_mut()
                .filter(|o| !o.completed && o.kind == ObjectiveKind::Workout)
            {
                objective.advance(1);
            }
        }
    }

    /// Fold a daily metrics snapshot into every active quest's objectives.
    ///
    /// Streak objectives are set (not incremented) to the clamped streak;
    /// hydration, recovery, and nutrition objectives each gain one day when
    /// their threshold was met. Assumes at most one call per calendar day;
    /// the service layer enforces that with `last_auto_progress_date`.
    pub fn check_auto_progress(&mut self, metrics: &DailyMetrics) {
        for quest in self.quests.iter_mut().filter(|q| q.status.is_active()) {
            for objective in quest.objectives.iter_mut().filter(|o| !o.completed) {
                match objective.kind {
                    ObjectiveKind::Streak => {
                        objective.set_progress(metrics.streak.min(objective.target));
                    }
                    ObjectiveKind::Hydration => {
                        if metrics.water_percentage >= 100 {
                            objective.advance(1);
                        }
                    }
                    ObjectiveKind::Recovery => {
                        if metrics.sleep_hours >= 7.0 {
                            objective.advance(1);
                        }
                    }
                    ObjectiveKind::Nutrition => {
                        if metrics.protein_met {
                            objective.advance(1);
                        }
                    }
                    ObjectiveKind::Workout => {}
                }
            }
        }
    }

    /// Complete a quest and return its XP reward.
    ///
    /// The reward is returned rather than credited; the caller owns the
    /// ledger and must award it.
    pub fn complete_quest(
        &mut self,
        quest_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<i64, QuestError> {
        let quest = self.active_quest_mut(quest_id)?;
        quest.status = QuestStatus::Completed;
        quest.completed_at = Some(now);

        tracing::info!(quest = %quest_id, reward = quest.xp_reward, "quest completed");
        Ok(quest.xp_reward)
    }

    /// Abandon a quest; terminal.
    pub fn abandon_quest(&mut self, quest_id: Uuid) -> Result<(), QuestError> {
        let quest = self.active_quest_mut(quest_id)?;
        quest.status = QuestStatus::Abandoned;

        tracing::info!(quest = %quest_id, "quest abandoned");
        Ok(())
    }

    fn active_quest_mut(&mut self, quest_id: Uuid) -> Result<&mut Quest, QuestError> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.id == quest_id)
            .ok_or(QuestError::NotFound(quest_id))?;

        if !quest.status.is_active() {
            return Err(QuestError::NotActive(quest_id));
        }
        Ok(quest)
    }
}

/// Quest engine errors.
#[derive(Debug, Error)]
pub enum QuestError {
    #[error("Quest not found: {0}")]
    NotFound(Uuid),

    #[error("Quest is no longer active: {0}")]
    NotActive(Uuid),

    #[error("Objective {objective} not found on quest {quest}")]
    ObjectiveNotFound { quest: Uuid, objective: Uuid },
}
