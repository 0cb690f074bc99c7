//! The progression engine facade.
//!
//! T071: Implement complete_workout orchestration
//! T072: Implement daily check with auto-progress day guard
//! T073: Implement quest, debt, and notification operations
//! T074: Implement read accessors for the UI layer
//!
//! Every mutating operation follows the same shape: load the snapshot,
//! apply the whole change in memory, commit once. Public methods use the
//! wall clock; each has an `*_at` variant taking an explicit instant so
//! the temporal arithmetic stays deterministic under test.

use chrono::{DateTime, Timelike, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::engine::snapshot::EngineSnapshot;
use crate::ledger::levels::{xp_to_next_level, LevelProgress};
use crate::ledger::types::{XpEventKind, XpProfile};
use crate::notifications::factory;
use crate::notifications::types::Notification;
use crate::penalties::tracker as penalties;
use crate::penalties::types::PenaltyRecord;
use crate::penalties::PenaltyError;
use crate::plan::types::{
    PlanMilestone, PlanProgress, ScheduledWorkout, WorkoutCompletion, WorkoutKind,
};
use crate::quests::catalog::{builtin_templates, Catalog};
use crate::quests::engine::QuestError;
use crate::quests::types::{DailyMetrics, Quest, QuestTemplate};
use crate::storage::store::{PersistenceStore, StoreError};
use crate::storage::EngineConfig;

/// What a single workout completion produced.
#[derive(Debug, Clone)]
pub struct CompletionSummary {
    /// XP credited (base plus streak bonus)
    pub xp_awarded: i64,
    /// Streak after the completion
    pub new_streak: u32,
    /// Whether this completion broke a previous streak
    pub streak_broken: bool,
    /// Milestones newly reached
    pub completed_milestones: Vec<PlanMilestone>,
    /// Penalties created by the missed-workout scan
    pub new_penalties: Vec<PenaltyRecord>,
    /// Level after all credits and debits
    pub level: u32,
}

/// What a daily check produced.
#[derive(Debug, Clone)]
pub struct DailyCheckSummary {
    /// Whether auto progress ran (false when already run today)
    pub auto_progress_ran: bool,
    /// Penalties created by the missed-workout scan
    pub new_penalties: Vec<PenaltyRecord>,
}

/// Single entry point for all progression and accountability state.
pub struct ProgressionEngine<S: PersistenceStore> {
    store: S,
    config: EngineConfig,
    catalog: Catalog,
    templates: Vec<QuestTemplate>,
}

impl<S: PersistenceStore> ProgressionEngine<S> {
    /// Create an engine over a store with built-in catalogs and defaults.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            catalog: Catalog::builtin(),
            templates: builtin_templates(),
        }
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            catalog: Catalog::builtin(),
            templates: builtin_templates(),
        }
    }

    // ------------------------------------------------------------------
    // Workout completion
    // ------------------------------------------------------------------

    /// Record a completed workout and fan the event out through the
    /// ledger, penalties, plan progress, quests, and notifications.
    pub fn complete_workout(
        &mut self,
        completion: &WorkoutCompletion,
    ) -> Result<CompletionSummary, EngineError> {
        self.complete_workout_at(completion, Utc::now())
    }

    /// Clock-injected variant of [`Self::complete_workout`].
    pub fn complete_workout_at(
        &mut self,
        completion: &WorkoutCompletion,
        now: DateTime<Utc>,
    ) -> Result<CompletionSummary, EngineError> {
        let today = now.date_naive();
        let mut snap = EngineSnapshot::load(&self.store)?;

        // Plan progress: lazy init, streak, counts, week bucket, milestones
        let outcome = {
            let config = &self.config;
            let plan = snap
                .plans
                .entry(completion.plan_id)
                .or_insert_with(|| PlanProgress::start(completion.plan_id, today, config));
            plan.record_completion(
                completion.date,
                config.default_scheduled_per_week,
                config.default_total_scheduled_workouts,
                now,
            )
        };

        for milestone in &outcome.completed_milestones {
            snap.notifications.push(factory::milestone(
                &milestone.name,
                &milestone.description,
                completion.plan_id,
            ));
        }

        let level_before = snap.profile.current_level;

        // Streak-break penalty fires with the pre-reset streak value
        if outcome.streak_broken {
            penalties::apply_streak_break(
                &mut snap.profile,
                &mut snap.penalties,
                outcome.previous_streak,
                now,
            );
        }

        // Base award plus capped streak bonus
        let xp_awarded =
            snap.profile
                .award_workout_xp(Some(completion.workout_id), outcome.new_streak, now);

        // Penalty scan over the whole calendar; one notification per record
        let new_penalties = penalties::check_missed_workouts(
            &mut snap.profile,
            &mut snap.penalties,
            &snap.scheduled,
            today,
            now,
        );
        for record in &new_penalties {
            snap.notifications
                .push(factory::penalty(record.xp_lost, &record.description));
        }

        if snap.profile.current_level < level_before {
            snap.notifications.push(factory::degradation_warning(
                snap.profile.current_level,
                &snap.profile.level_name,
            ));
        }

        if let Some(plan) = snap.plans.get(&completion.plan_id) {
            snap.notifications.push(factory::progress_update(plan));
        }

        // Mark the originating calendar entry done
        if let Some(workout) = snap
            .scheduled
            .iter_mut()
            .find(|w| w.id == completion.workout_id)
        {
            workout.completed = true;
        }

        // Advance workout objectives once per distinct trained body part
        for body_part in self.catalog.body_parts_for_exercises(&completion.exercises) {
            snap.quest_log.progress_workout_objectives(&body_part);
        }

        let level = snap.profile.current_level;
        snap.commit(&mut self.store)?;

        tracing::info!(
            workout = %completion.workout_id,
            plan = %completion.plan_id,
            xp_awarded,
            streak = outcome.new_streak,
            "workout completion committed"
        );

        Ok(CompletionSummary {
            xp_awarded,
            new_streak: outcome.new_streak,
            streak_broken: outcome.streak_broken,
            completed_milestones: outcome.completed_milestones,
            new_penalties,
            level,
        })
    }

    // ------------------------------------------------------------------
    // Daily check
    // ------------------------------------------------------------------

    /// Run the once-per-day maintenance pass: metrics-driven quest
    /// progress, the missed-workout scan, and standing warnings.
    pub fn run_daily_check(
        &mut self,
        metrics: &DailyMetrics,
    ) -> Result<DailyCheckSummary, EngineError> {
        self.run_daily_check_at(metrics, Utc::now())
    }

    /// Clock-injected variant of [`Self::run_daily_check`].
    ///
    /// Auto progress for day-bucketed objectives runs at most once per
    /// calendar day; a second call the same day skips it. The penalty
    /// scan is idempotent through its own cursor and always runs.
    pub fn run_daily_check_at(
        &mut self,
        metrics: &DailyMetrics,
        now: DateTime<Utc>,
    ) -> Result<DailyCheckSummary, EngineError> {
        let today = now.date_naive();
        let mut snap = EngineSnapshot::load(&self.store)?;

        let auto_progress_ran = snap.quest_log.last_auto_progress_date != Some(today);
        if auto_progress_ran {
            snap.quest_log.check_auto_progress(metrics);
            snap.quest_log.last_auto_progress_date = Some(today);
        } else {
            tracing::debug!(%today, "auto progress already ran today");
        }

        let missed: Vec<ScheduledWorkout> =
            penalties::missed_candidates(&snap.scheduled, snap.profile.last_checked_date, today)
                .into_iter()
                .cloned()
                .collect();

        let level_before = snap.profile.current_level;
        let new_penalties = penalties::check_missed_workouts(
            &mut snap.profile,
            &mut snap.penalties,
            &snap.scheduled,
            today,
            now,
        );
        for record in &new_penalties {
            snap.notifications
                .push(factory::penalty(record.xp_lost, &record.description));
        }
        if let Some(warning) = factory::missed_warning(&missed) {
            snap.notifications.push(warning);
        }
        if snap.profile.current_level < level_before {
            snap.notifications.push(factory::degradation_warning(
                snap.profile.current_level,
                &snap.profile.level_name,
            ));
        }

        let debts = penalties::unresolved_debts(&snap.penalties);
        if !debts.is_empty() {
            let total = penalties::total_debt(&snap.penalties);
            snap.notifications
                .push(factory::debt_warning(debts.len(), total));
        }

        snap.commit(&mut self.store)?;

        Ok(DailyCheckSummary {
            auto_progress_ran,
            new_penalties,
        })
    }

    // ------------------------------------------------------------------
    // Debts
    // ------------------------------------------------------------------

    /// Resolve a penalty, crediting half its magnitude back.
    pub fn resolve_debt(&mut self, penalty_id: Uuid) -> Result<i64, EngineError> {
        self.resolve_debt_at(penalty_id, Utc::now())
    }

    /// Clock-injected variant of [`Self::resolve_debt`].
    pub fn resolve_debt_at(
        &mut self,
        penalty_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<i64, EngineError> {
        let mut snap = EngineSnapshot::load(&self.store)?;
        let refund =
            penalties::resolve_debt(&mut snap.profile, &mut snap.penalties, penalty_id, now)?;
        snap.commit(&mut self.store)?;
        Ok(refund)
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    /// Accept a catalog template as a new active quest.
    pub fn accept_quest(&mut self, template_id: &str) -> Result<Uuid, EngineError> {
        self.accept_quest_at(template_id, Utc::now())
    }

    /// Clock-injected variant of [`Self::accept_quest`].
    pub fn accept_quest_at(
        &mut self,
        template_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Uuid, EngineError> {
        let template = self
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| EngineError::TemplateNotFound(template_id.to_string()))?
            .clone();

        let mut snap = EngineSnapshot::load(&self.store)?;

        let taken = snap
            .quest_log
            .quests
            .iter()
            .any(|q| q.status.is_active() && q.title == template.title);
        if taken {
            return Err(EngineError::DuplicateQuest(template.title));
        }

        let quest_id = snap.quest_log.accept(&template, now);
        snap.commit(&mut self.store)?;
        Ok(quest_id)
    }

    /// Complete a quest and credit its reward to the ledger.
    pub fn complete_quest(&mut self, quest_id: Uuid) -> Result<i64, EngineError> {
        self.complete_quest_at(quest_id, Utc::now())
    }

    /// Clock-injected variant of [`Self::complete_quest`].
    pub fn complete_quest_at(
        &mut self,
        quest_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<i64, EngineError> {
        let mut snap = EngineSnapshot::load(&self.store)?;

        let reward = snap.quest_log.complete_quest(quest_id, now)?;
        let (title, fulfilled) = snap
            .quest_log
            .quests
            .iter()
            .find(|q| q.id == quest_id)
            .map(|q| (q.title.clone(), q.is_fulfilled()))
            .unwrap_or_default();
        if !fulfilled {
            tracing::warn!(quest = %quest_id, "quest completed with open objectives");
        }
        snap.profile.add_xp(
            XpEventKind::QuestComplete,
            reward,
            format!("Quest complete: {title}"),
            None,
            now,
        );

        snap.commit(&mut self.store)?;
        Ok(reward)
    }

    /// Abandon a quest; terminal.
    pub fn abandon_quest(&mut self, quest_id: Uuid) -> Result<(), EngineError> {
        let mut snap = EngineSnapshot::load(&self.store)?;
        snap.quest_log.abandon_quest(quest_id)?;
        snap.commit(&mut self.store)?;
        Ok(())
    }

    /// Manually advance a quest objective.
    pub fn increment_objective(
        &mut self,
        quest_id: Uuid,
        objective_id: Uuid,
        amount: u32,
    ) -> Result<(), EngineError> {
        let mut snap = EngineSnapshot::load(&self.store)?;
        snap.quest_log
            .increment_objective(quest_id, objective_id, amount)?;
        snap.commit(&mut self.store)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Calendar
    // ------------------------------------------------------------------

    /// Replace the scheduled-workout calendar.
    pub fn set_scheduled_workouts(
        &mut self,
        workouts: Vec<ScheduledWorkout>,
    ) -> Result<(), EngineError> {
        let mut snap = EngineSnapshot::load(&self.store)?;
        snap.scheduled = workouts;
        snap.commit(&mut self.store)?;
        Ok(())
    }

    /// The scheduled-workout calendar.
    pub fn scheduled_workouts(&self) -> Result<Vec<ScheduledWorkout>, EngineError> {
        Ok(EngineSnapshot::load(&self.store)?.scheduled)
    }

    /// Reminders for today's incomplete workouts, priced by hours left in
    /// the day. Pure derivation; nothing is persisted.
    pub fn upcoming_reminders(&self) -> Result<Vec<Notification>, EngineError> {
        self.upcoming_reminders_at(Utc::now())
    }

    /// Clock-injected variant of [`Self::upcoming_reminders`].
    pub fn upcoming_reminders_at(&self, now: DateTime<Utc>) -> Result<Vec<Notification>, EngineError> {
        let today = now.date_naive();
        let hours_left = i64::from(24 - now.hour().min(23));
        let snap = EngineSnapshot::load(&self.store)?;

        Ok(snap
            .scheduled
            .iter()
            .filter(|w| !w.completed && w.kind != WorkoutKind::Rest && w.date == today)
            .map(|w| factory::reminder(w, hours_left))
            .collect())
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    /// The current XP profile.
    pub fn profile(&self) -> Result<XpProfile, EngineError> {
        Ok(EngineSnapshot::load(&self.store)?.profile)
    }

    /// Progress toward the next level.
    pub fn level_progress(&self) -> Result<LevelProgress, EngineError> {
        let profile = self.profile()?;
        Ok(xp_to_next_level(profile.total_xp))
    }

    /// All penalty records, resolved and not.
    pub fn penalties(&self) -> Result<Vec<PenaltyRecord>, EngineError> {
        Ok(EngineSnapshot::load(&self.store)?.penalties)
    }

    /// Unresolved penalties only.
    pub fn unresolved_debts(&self) -> Result<Vec<PenaltyRecord>, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(penalties::unresolved_debts(&snap.penalties)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Sum of unresolved penalty magnitudes.
    pub fn total_debt(&self) -> Result<i64, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(penalties::total_debt(&snap.penalties))
    }

    /// Active quests.
    pub fn active_quests(&self) -> Result<Vec<Quest>, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(snap.quest_log.active_quests().into_iter().cloned().collect())
    }

    /// Completed quests.
    pub fn completed_quests(&self) -> Result<Vec<Quest>, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(snap
            .quest_log
            .completed_quests()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Templates not represented by an active quest.
    pub fn available_templates(&self) -> Result<Vec<QuestTemplate>, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(snap
            .quest_log
            .available_templates(&self.templates)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Progress for one plan, if tracking has started.
    pub fn plan_progress(&self, plan_id: Uuid) -> Result<Option<PlanProgress>, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(snap.plans.get(&plan_id).cloned())
    }

    /// Notifications the user has not seen yet.
    pub fn unread_notifications(&self) -> Result<Vec<Notification>, EngineError> {
        let snap = EngineSnapshot::load(&self.store)?;
        Ok(snap
            .notifications
            .iter()
            .filter(|n| !n.read)
            .cloned()
            .collect())
    }

    /// Mark a notification read. Returns false when the id is unknown.
    pub fn mark_notification_read(&mut self, id: Uuid) -> Result<bool, EngineError> {
        let mut snap = EngineSnapshot::load(&self.store)?;
        let Some(notification) = snap.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        notification.read = true;
        snap.commit(&mut self.store)?;
        Ok(true)
    }
}

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error(transparent)]
    Penalty(#[from] PenaltyError),

    #[error("Quest template not found: {0}")]
    TemplateNotFound(String),

    #[error("A quest with title \"{0}\" is already active")]
    DuplicateQuest(String),
}
