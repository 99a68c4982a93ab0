//! Progress tracker: the rules for completing steps, unlocking badges and resetting
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{BadgeId, DEFAULT_STEP_POINTS, ModuleId};
use crate::state::{GameState, InvalidStepId, StepId};

/// Source of "now" for completion timestamps.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("step {step} is outside 1..={steps} for module {module}")]
    StepOutOfRange {
        module: ModuleId,
        step: u32,
        steps: u32,
    },
    #[error("step numbers start at 1")]
    ZeroStep,
    /// The module text cannot be stored as a step id, e.g. an empty module.
    #[error(transparent)]
    InvalidStep(#[from] InvalidStepId),
}

/// What a single `complete_step` call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: StepId,
    pub newly_completed: bool,
    pub points_awarded: u32,
    pub badge_unlocked: Option<BadgeId>,
    pub game_completed: bool,
}

impl StepOutcome {
    fn already_completed(step: StepId) -> Self {
        Self {
            step,
            newly_completed: false,
            points_awarded: 0,
            badge_unlocked: None,
            game_completed: false,
        }
    }

    /// Notifications for the UI, in the order they should be shown.
    #[must_use]
    pub fn events(&self) -> Vec<TrackerEvent> {
        if !self.newly_completed {
            return vec![TrackerEvent::AlreadyCompleted {
                step: self.step.to_string(),
            }];
        }
        let mut events = vec![TrackerEvent::PointsAwarded {
            amount: self.points_awarded,
        }];
        if let Some(badge) = self.badge_unlocked {
            events.push(TrackerEvent::BadgeUnlocked {
                badge,
                name: badge.display_name(),
            });
        }
        if self.game_completed {
            events.push(TrackerEvent::GameCompleted);
        }
        events
    }
}

/// Outbound notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackerEvent {
    AlreadyCompleted { step: String },
    PointsAwarded { amount: u32 },
    BadgeUnlocked { badge: BadgeId, name: &'static str },
    GameCompleted,
}

impl TrackerEvent {
    /// Short user-facing message for a toast notification.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AlreadyCompleted { .. } => "Step already completed! ✅".to_string(),
            Self::PointsAwarded { amount } => format!("+{amount} points earned! 🌟"),
            Self::BadgeUnlocked { name, .. } => format!("🏆 Badge Unlocked: {name}!"),
            Self::GameCompleted => {
                "🎉 Quest Completed! You are now a Power BI Master!".to_string()
            }
        }
    }
}

/// Proof that a reset was requested and shown to the user before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequest {
    points_lost: u32,
    badges_lost: usize,
    steps_lost: usize,
}

impl ResetRequest {
    #[must_use]
    pub const fn points_lost(&self) -> u32 {
        self.points_lost
    }

    #[must_use]
    pub const fn badges_lost(&self) -> usize {
        self.badges_lost
    }

    #[must_use]
    pub const fn steps_lost(&self) -> usize {
        self.steps_lost
    }

    /// Consequence lines for the confirmation prompt.
    #[must_use]
    pub fn consequences(&self) -> [&'static str; 4] {
        [
            "Reset all points to 0",
            "Remove all badges",
            "Mark all steps as incomplete",
            "Clear completion status",
        ]
    }
}

/// Owns one [`GameState`] and applies the progression rules to it.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    state: GameState,
    clock: Clock,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(GameState::default())
    }
}

impl ProgressTracker {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            clock: Utc::now,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Record a step as done.
    ///
    /// Completing a step twice is a no-op whose outcome has
    /// `newly_completed == false`. Modules outside the catalog are credited
    /// [`DEFAULT_STEP_POINTS`] and have no progress counter or badge.
    ///
    /// # Errors
    ///
    /// Returns an error if the step number is 0 or beyond the module's step
    /// count, or if the module text cannot form a stored step id.
    pub fn complete_step(&mut self, module: &str, number: u32) -> Result<StepOutcome, TrackerError> {
        if number == 0 {
            return Err(TrackerError::ZeroStep);
        }
        let step: StepId = format!("{module}-{number}").parse()?;
        let module_id = step.module_id();
        if let Some(id) = module_id {
            let cfg = id.config();
            if !cfg.contains_step(number) {
                return Err(TrackerError::StepOutOfRange {
                    module: id,
                    step: number,
                    steps: cfg.steps,
                });
            }
        }

        if self.state.completed_steps.contains(&step) {
            log::debug!("step {step} already completed");
            return Ok(StepOutcome::already_completed(step));
        }

        self.state.completed_steps.insert(step.clone());
        let points = module_id.map_or_else(
            || {
                log::warn!("unknown module {module:?}, crediting {DEFAULT_STEP_POINTS} points");
                DEFAULT_STEP_POINTS
            },
            |id| id.config().points,
        );
        self.state.total_points += points;

        let badge_unlocked = module_id.and_then(|id| {
            self.state.module_progress.increment(id);
            self.check_badge_unlock(id)
        });
        let game_completed = self.check_game_completion();

        log::info!(
            "step {step} completed: +{points} points (total {})",
            self.state.total_points
        );
        Ok(StepOutcome {
            step,
            newly_completed: true,
            points_awarded: points,
            badge_unlocked,
            game_completed,
        })
    }

    /// Convenience wrapper for catalog modules.
    ///
    /// # Errors
    ///
    /// Same as [`Self::complete_step`].
    pub fn complete(&mut self, module: ModuleId, number: u32) -> Result<StepOutcome, TrackerError> {
        self.complete_step(module.as_str(), number)
    }

    fn check_badge_unlock(&mut self, module: ModuleId) -> Option<BadgeId> {
        let cfg = module.config();
        let progress = self.state.module_progress.get(module);
        if progress >= cfg.steps && !self.state.badges.is_unlocked(cfg.badge) {
            self.state.badges.unlock(cfg.badge);
            log::info!("badge unlocked: {}", cfg.badge);
            Some(cfg.badge)
        } else {
            None
        }
    }

    fn check_game_completion(&mut self) -> bool {
        if self.state.badges.all_unlocked() && !self.state.game_completed {
            self.state.game_completed = true;
            self.state.completion_date = Some((self.clock)());
            log::info!("quest completed by {:?}", self.state.player_name);
            true
        } else {
            false
        }
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.state.player_name = name.into();
    }

    /// Describe what a reset would discard. Pass the result to [`Self::reset`]
    /// once the user has confirmed.
    #[must_use]
    pub fn request_reset(&self) -> ResetRequest {
        ResetRequest {
            points_lost: self.state.total_points,
            badges_lost: self.state.badges.unlocked_count(),
            steps_lost: self.state.completed_steps.len(),
        }
    }

    /// Replace all progress with a fresh state named `player_name`.
    pub fn reset(&mut self, request: ResetRequest, player_name: impl Into<String>) {
        log::info!(
            "resetting progress: {} points, {} badges, {} steps discarded",
            request.points_lost,
            request.badges_lost,
            request.steps_lost
        );
        self.state = GameState::fresh(player_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ModuleProgress;
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn tracker() -> ProgressTracker {
        ProgressTracker::default().with_clock(fixed_clock)
    }

    #[test]
    fn data_module_unlocks_badge_on_fourth_step() {
        let mut tracker = tracker();
        for n in 1..=3 {
            let outcome = tracker.complete(ModuleId::Data, n).unwrap();
            assert_eq!(outcome.points_awarded, 25);
            assert_eq!(outcome.badge_unlocked, None);
        }
        assert_eq!(tracker.state().total_points, 75);
        assert!(!tracker.state().badges.data);

        let outcome = tracker.complete(ModuleId::Data, 4).unwrap();
        assert_eq!(outcome.badge_unlocked, Some(BadgeId::Data));
        assert_eq!(tracker.state().total_points, 100);
        assert!(tracker.state().badges.data);
        assert!(!outcome.game_completed);
    }

    #[test]
    fn repeated_step_is_a_reported_no_op() {
        let mut tracker = tracker();
        tracker.complete(ModuleId::Visual, 2).unwrap();
        let before = tracker.state().clone();

        let outcome = tracker.complete(ModuleId::Visual, 2).unwrap();
        assert!(!outcome.newly_completed);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(tracker.state(), &before);
        assert_eq!(
            outcome.events(),
            vec![TrackerEvent::AlreadyCompleted {
                step: "visual-2".to_string()
            }]
        );
    }

    #[test]
    fn out_of_range_steps_change_nothing() {
        let mut tracker = tracker();
        assert_eq!(
            tracker.complete(ModuleId::Interactive, 4),
            Err(TrackerError::StepOutOfRange {
                module: ModuleId::Interactive,
                step: 4,
                steps: 3
            })
        );
        assert_eq!(tracker.complete_step("data", 0), Err(TrackerError::ZeroStep));
        assert_eq!(tracker.state(), &GameState::default());
    }

    #[test]
    fn empty_module_is_rejected_without_scoring() {
        let mut tracker = tracker();
        assert!(matches!(
            tracker.complete_step("", 1),
            Err(TrackerError::InvalidStep(_))
        ));
        assert_eq!(tracker.state(), &GameState::default());
    }

    #[test]
    fn hyphenated_unknown_module_still_scores() {
        let mut tracker = tracker();
        let outcome = tracker.complete_step("side-quest", 2).unwrap();
        assert_eq!(outcome.step.to_string(), "side-quest-2");
        assert_eq!("side-quest-2".parse::<StepId>(), Ok(outcome.step));
    }

    #[test]
    fn unknown_module_falls_back_to_default_points() {
        let mut tracker = tracker();
        let outcome = tracker.complete_step("bonus", 9).unwrap();
        assert!(outcome.newly_completed);
        assert_eq!(outcome.points_awarded, DEFAULT_STEP_POINTS);
        assert_eq!(outcome.badge_unlocked, None);
        assert_eq!(tracker.state().total_points, DEFAULT_STEP_POINTS);
        assert_eq!(tracker.state().module_progress, ModuleProgress::default());
        assert!(tracker.state().is_step_completed(&StepId::new("bonus", 9)));
    }

    #[test]
    fn final_publish_step_completes_the_game() {
        let mut tracker = tracker();
        for id in [
            ModuleId::Data,
            ModuleId::Visual,
            ModuleId::Format,
            ModuleId::Interactive,
        ] {
            for n in 1..=id.config().steps {
                tracker.complete(id, n).unwrap();
            }
        }
        tracker.complete(ModuleId::Publish, 1).unwrap();
        tracker.complete(ModuleId::Publish, 2).unwrap();
        assert!(!tracker.state().game_completed);
        assert_eq!(tracker.state().completion_date, None);

        let outcome = tracker.complete(ModuleId::Publish, 3).unwrap();
        assert_eq!(outcome.badge_unlocked, Some(BadgeId::Publisher));
        assert!(outcome.game_completed);
        assert!(tracker.state().game_completed);
        assert_eq!(tracker.state().completion_date, Some(fixed_clock()));
        assert_eq!(tracker.state().total_points, 815);
        assert_eq!(
            outcome.events(),
            vec![
                TrackerEvent::PointsAwarded { amount: 40 },
                TrackerEvent::BadgeUnlocked {
                    badge: BadgeId::Publisher,
                    name: "Publishing Hero"
                },
                TrackerEvent::GameCompleted,
            ]
        );
    }

    #[test]
    fn reset_keeps_only_the_supplied_name() {
        let mut tracker = tracker();
        tracker.set_player_name("Old Name");
        for n in 1..=4 {
            tracker.complete(ModuleId::Data, n).unwrap();
        }
        let request = tracker.request_reset();
        assert_eq!(request.points_lost(), 100);
        assert_eq!(request.badges_lost(), 1);
        assert_eq!(request.steps_lost(), 4);

        tracker.reset(request, "New Name");
        assert_eq!(tracker.state(), &GameState::fresh("New Name"));
    }

    #[test]
    fn event_messages_read_like_toasts() {
        assert_eq!(
            TrackerEvent::PointsAwarded { amount: 50 }.message(),
            "+50 points earned! 🌟"
        );
        assert_eq!(
            TrackerEvent::BadgeUnlocked {
                badge: BadgeId::Visual,
                name: BadgeId::Visual.display_name()
            }
            .message(),
            "🏆 Badge Unlocked: Visual Expert!"
        );
    }
}
