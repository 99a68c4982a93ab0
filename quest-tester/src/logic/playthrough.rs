use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

use quest_game::{
    CertificateData, CertificateError, GameState, MemoryStore, ModuleId, QuestEngine, StepId,
    TrackerEvent, points_for,
};

/// Completion stamp used for every simulated run.
pub fn fixed_clock() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default()
}

pub fn certificate_date() -> NaiveDate {
    fixed_clock().date_naive()
}

/// Order in which a plan walks the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOrder {
    /// Every step, module by module
    InOrder,
    /// Every step, shuffled by the run seed
    Shuffled,
    /// All steps of one module
    SingleModule(ModuleId),
    /// A seeded random subset of the catalog
    Partial,
}

impl StepOrder {
    pub fn label(self) -> String {
        match self {
            Self::InOrder => "in-order".to_string(),
            Self::Shuffled => "shuffled".to_string(),
            Self::SingleModule(module) => format!("module:{module}"),
            Self::Partial => "partial".to_string(),
        }
    }
}

/// One simulated user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Complete { module: String, number: u32 },
    Rename(String),
    Reset,
    Reload,
}

/// Assertion hook run after a playthrough completes.
pub type PlaythroughExpectation = fn(&PlaythroughSummary) -> anyhow::Result<()>;

/// Declarative plan for a single playthrough.
#[derive(Debug, Clone)]
pub struct PlaythroughPlan {
    pub order: StepOrder,
    pub player: Option<String>,
    /// Chance that any completion is followed by a repeat of an earlier step
    pub repeat_chance: f64,
    pub unknown_steps: u32,
    pub out_of_range_steps: u32,
    pub reset_after: Option<usize>,
    pub reload_each_action: bool,
    pub expectations: Vec<PlaythroughExpectation>,
}

impl PlaythroughPlan {
    #[must_use]
    pub const fn new(order: StepOrder) -> Self {
        Self {
            order,
            player: None,
            repeat_chance: 0.0,
            unknown_steps: 0,
            out_of_range_steps: 0,
            reset_after: None,
            reload_each_action: false,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.player = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_repeats(mut self, chance: f64) -> Self {
        self.repeat_chance = chance;
        self
    }

    #[must_use]
    pub const fn with_unknown_steps(mut self, count: u32) -> Self {
        self.unknown_steps = count;
        self
    }

    #[must_use]
    pub const fn with_out_of_range_steps(mut self, count: u32) -> Self {
        self.out_of_range_steps = count;
        self
    }

    #[must_use]
    pub const fn with_reset_after(mut self, completions: usize) -> Self {
        self.reset_after = Some(completions);
        self
    }

    #[must_use]
    pub const fn with_reloads(mut self) -> Self {
        self.reload_each_action = true;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: PlaythroughExpectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Expand the plan into a concrete action list for `seed`.
    pub fn actions(&self, seed: u64) -> Vec<Action> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut steps: Vec<(String, u32)> = match self.order {
            StepOrder::InOrder | StepOrder::Shuffled | StepOrder::Partial => ModuleId::ALL
                .into_iter()
                .flat_map(|module| {
                    (1..=module.config().steps).map(move |n| (module.as_str().to_string(), n))
                })
                .collect(),
            StepOrder::SingleModule(module) => (1..=module.config().steps)
                .map(|n| (module.as_str().to_string(), n))
                .collect(),
        };
        match self.order {
            StepOrder::Shuffled => steps.shuffle(&mut rng),
            StepOrder::Partial => {
                steps.shuffle(&mut rng);
                let keep = rng.gen_range(1..=steps.len());
                steps.truncate(keep);
            }
            StepOrder::InOrder | StepOrder::SingleModule(_) => {}
        }
        steps.extend((1..=self.unknown_steps).map(|n| ("bonus".to_string(), n)));
        for _ in 0..self.out_of_range_steps {
            let module = ModuleId::ALL[rng.gen_range(0..ModuleId::ALL.len())];
            steps.push((module.as_str().to_string(), module.config().steps + rng.gen_range(1..=3)));
        }
        if self.unknown_steps > 0 || self.out_of_range_steps > 0 {
            steps.shuffle(&mut rng);
        }

        let mut actions = Vec::new();
        if let Some(name) = &self.player {
            actions.push(Action::Rename(name.clone()));
        }
        let mut completed = 0_usize;
        for (idx, (module, number)) in steps.iter().enumerate() {
            actions.push(Action::Complete {
                module: module.clone(),
                number: *number,
            });
            completed += 1;
            if self.repeat_chance > 0.0 && rng.gen_bool(self.repeat_chance) {
                let (module, number) = &steps[rng.gen_range(0..=idx)];
                actions.push(Action::Complete {
                    module: module.clone(),
                    number: *number,
                });
            }
            if self.reset_after == Some(completed) {
                actions.push(Action::Reset);
            }
            if self.reload_each_action {
                actions.push(Action::Reload);
            }
        }
        actions
    }
}

/// Outcome of one seeded playthrough.
#[derive(Debug, Clone)]
pub struct PlaythroughSummary {
    pub seed: u64,
    pub order: StepOrder,
    pub actions: Vec<Action>,
    pub events: Vec<TrackerEvent>,
    pub rejected: usize,
    pub resets: usize,
    pub reload_mismatches: usize,
    pub violations: Vec<String>,
    pub final_state: GameState,
    pub certificate: Result<CertificateData, CertificateError>,
}

impl PlaythroughSummary {
    pub fn count_events(&self, pred: impl Fn(&TrackerEvent) -> bool) -> usize {
        self.events.iter().filter(|event| pred(event)).count()
    }

    /// Points the completed set should be worth.
    pub fn expected_points(&self) -> u32 {
        self.final_state
            .completed_steps
            .iter()
            .map(|step| points_for(step.module()))
            .sum()
    }
}

/// Check the state aggregate against the catalog rules.
pub fn check_invariants(state: &GameState) -> Vec<String> {
    let mut violations = Vec::new();

    let expected_points: u32 = state
        .completed_steps
        .iter()
        .map(|step| points_for(step.module()))
        .sum();
    if state.total_points != expected_points {
        violations.push(format!(
            "total points {} but completed steps are worth {expected_points}",
            state.total_points
        ));
    }

    for module in ModuleId::ALL {
        let counted = state
            .completed_steps
            .iter()
            .filter(|step| step.module_id() == Some(module))
            .count();
        let progress = state.module_progress.get(module);
        if usize::try_from(progress).ok() != Some(counted) {
            violations.push(format!(
                "{module} progress {progress} but {counted} steps recorded"
            ));
        }
        let cfg = module.config();
        if progress > cfg.steps {
            violations.push(format!("{module} progress {progress} exceeds {}", cfg.steps));
        }
        if state.badges.is_unlocked(cfg.badge) != (progress == cfg.steps) {
            violations.push(format!("{} badge out of sync with progress", cfg.badge));
        }
    }

    if state.game_completed != state.badges.all_unlocked() {
        violations.push("game_completed disagrees with badges".to_string());
    }
    if state.game_completed != state.completion_date.is_some() {
        violations.push("completion date disagrees with game_completed".to_string());
    }
    violations
}

/// Runs playthrough plans against an in-memory store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaythroughRunner {
    verbose: bool,
}

impl PlaythroughRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_plan(&self, plan: &PlaythroughPlan, seed: u64) -> PlaythroughSummary {
        let store = MemoryStore::new();
        let mut engine = QuestEngine::open(&store).with_clock(fixed_clock);
        let actions = plan.actions(seed);
        let mut events = Vec::new();
        let mut rejected = 0;
        let mut resets = 0;
        let mut reload_mismatches = 0;
        let mut violations = Vec::new();
        let mut seen: BTreeSet<StepId> = BTreeSet::new();

        for (idx, action) in actions.iter().enumerate() {
            match action {
                Action::Complete { module, number } => {
                    match engine.complete_step(module, *number) {
                        Ok(outcome) => {
                            if outcome.newly_completed && !seen.insert(outcome.step.clone()) {
                                violations.push(format!(
                                    "action {idx}: {} scored twice",
                                    outcome.step
                                ));
                            }
                            events.extend(outcome.events());
                        }
                        Err(err) => {
                            rejected += 1;
                            if self.verbose {
                                log::debug!("action {idx}: rejected {module}-{number}: {err}");
                            }
                        }
                    }
                }
                Action::Rename(name) => engine.set_player_name(name.clone()),
                Action::Reset => {
                    let request = engine.request_reset();
                    let name = engine.state().player_name.clone();
                    engine.reset(request, name);
                    seen.clear();
                    resets += 1;
                }
                Action::Reload => {
                    let before = engine.state().clone();
                    engine = QuestEngine::open(&store).with_clock(fixed_clock);
                    if engine.state() != &before {
                        reload_mismatches += 1;
                    }
                }
            }
            violations.extend(
                check_invariants(engine.state())
                    .into_iter()
                    .map(|v| format!("action {idx}: {v}")),
            );
        }

        let certificate = engine.certificate(certificate_date());
        PlaythroughSummary {
            seed,
            order: plan.order,
            actions,
            events,
            rejected,
            resets,
            reload_mismatches,
            violations,
            final_state: engine.state().clone(),
            certificate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_order_plan_completes_every_step() {
        let plan = PlaythroughPlan::new(StepOrder::InOrder).with_player("Ada");
        let summary = PlaythroughRunner::new(false).run_plan(&plan, 1);
        assert!(summary.violations.is_empty(), "{:?}", summary.violations);
        assert_eq!(summary.final_state.total_points, 815);
        assert!(summary.final_state.game_completed);
        assert_eq!(summary.final_state.completion_date, Some(fixed_clock()));
        assert!(summary.certificate.is_ok());
    }

    #[test]
    fn actions_are_deterministic_per_seed() {
        let plan = PlaythroughPlan::new(StepOrder::Shuffled).with_repeats(0.4);
        assert_eq!(plan.actions(99), plan.actions(99));
    }

    #[test]
    fn out_of_range_steps_are_rejected_without_side_effects() {
        let plan = PlaythroughPlan::new(StepOrder::SingleModule(ModuleId::Data))
            .with_out_of_range_steps(3);
        let summary = PlaythroughRunner::new(false).run_plan(&plan, 5);
        assert_eq!(summary.rejected, 3);
        assert_eq!(summary.final_state.total_points, 100);
        assert!(summary.violations.is_empty(), "{:?}", summary.violations);
    }

    #[test]
    fn reloads_preserve_state() {
        let plan = PlaythroughPlan::new(StepOrder::Partial).with_reloads();
        let summary = PlaythroughRunner::new(false).run_plan(&plan, 11);
        assert_eq!(summary.reload_mismatches, 0);
    }

    #[test]
    fn invariant_check_flags_tampered_points() {
        let mut state = GameState::default();
        state.total_points = 10;
        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("total points 10"));
    }
}
