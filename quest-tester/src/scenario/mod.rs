use anyhow::{Result, ensure};

use crate::logic::{PlaythroughPlan, PlaythroughSummary, StepOrder};
use quest_game::{BadgeId, CertificateError, ModuleId, TrackerEvent, max_points};

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: PlaythroughPlan,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, plan: PlaythroughPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

fn smoke_expectation(summary: &PlaythroughSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(state.completed_count() > 0, "smoke run should complete a step");
    ensure!(state.total_points > 0, "smoke run should award points");
    ensure!(
        state.total_points == summary.expected_points(),
        "points should match completed steps"
    );
    Ok(())
}

fn data_module_expectation(summary: &PlaythroughSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(state.total_points == 100, "data module should be worth 100 points");
    ensure!(state.badges.is_unlocked(BadgeId::Data), "data badge should unlock");
    ensure!(state.badges.unlocked_count() == 1, "only the data badge should unlock");
    ensure!(state.module_status(ModuleId::Data) == "4/4 Steps Complete");
    ensure!(!state.game_completed, "one module must not finish the quest");
    Ok(())
}

fn full_quest_expectation(summary: &PlaythroughSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(
        state.total_points == max_points(),
        "full quest should score {} but scored {}",
        max_points(),
        state.total_points
    );
    ensure!(state.badges.all_unlocked(), "every badge should unlock");
    ensure!(state.game_completed, "quest should be complete");
    ensure!(state.completion_date.is_some(), "completion should be stamped");
    ensure!(state.overall_label() == "100% Complete");
    ensure!(
        summary.count_events(|e| matches!(e, TrackerEvent::GameCompleted)) == 1,
        "game completion should be announced once"
    );
    ensure!(summary.certificate.is_ok(), "named finisher should get a certificate");
    Ok(())
}

fn idempotence_expectation(summary: &PlaythroughSummary) -> Result<()> {
    full_quest_expectation(summary)?;
    let repeats = summary.count_events(|e| matches!(e, TrackerEvent::AlreadyCompleted { .. }));
    let awards = summary.count_events(|e| matches!(e, TrackerEvent::PointsAwarded { .. }));
    ensure!(
        awards == 19,
        "each step should award points exactly once, saw {awards} awards"
    );
    ensure!(
        awards + repeats == summary.actions.len() - 1,
        "every completion request should yield an award or a repeat notice"
    );
    Ok(())
}

fn persistence_expectation(summary: &PlaythroughSummary) -> Result<()> {
    ensure!(
        summary.reload_mismatches == 0,
        "{} reloads produced a different state",
        summary.reload_mismatches
    );
    Ok(())
}

fn reset_expectation(summary: &PlaythroughSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(summary.resets == 1, "exactly one reset should run");
    ensure!(state.player_name == "Riley", "reset should keep the player name");
    ensure!(
        state.total_points == summary.expected_points(),
        "points after reset should only count later steps"
    );
    ensure!(!state.game_completed, "a reset run should not finish the quest");
    Ok(())
}

fn unknown_module_expectation(summary: &PlaythroughSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(
        state.total_points == max_points() + 3 * 25,
        "unknown modules should add 25 points each"
    );
    ensure!(state.completed_count() == 22, "unknown steps should be recorded");
    ensure!(state.badges.unlocked_count() == 5, "unknown modules unlock nothing");
    Ok(())
}

fn out_of_range_expectation(summary: &PlaythroughSummary) -> Result<()> {
    ensure!(summary.rejected == 4, "out-of-range steps should be rejected");
    ensure!(
        summary.final_state.total_points == max_points(),
        "rejected steps should not change the score"
    );
    Ok(())
}

fn certificate_gate_expectation(summary: &PlaythroughSummary) -> Result<()> {
    ensure!(summary.final_state.game_completed, "quest should be complete");
    ensure!(
        summary.certificate == Err(CertificateError::MissingName),
        "an unnamed finisher must be asked for a name"
    );
    Ok(())
}

fn random_playthrough_expectation(summary: &PlaythroughSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(state.total_points <= max_points(), "score exceeds the maximum");
    ensure!(
        summary.certificate.is_err() || state.certificate_eligible(),
        "certificate issued to an ineligible player"
    );
    Ok(())
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let scenario = match name.to_lowercase().as_str() {
        "smoke" => TestScenario::new(
            "Smoke Test",
            PlaythroughPlan::new(StepOrder::Partial).with_expectation(smoke_expectation),
        ),
        "data-module" | "data" => TestScenario::new(
            "Data Module Badge",
            PlaythroughPlan::new(StepOrder::SingleModule(ModuleId::Data))
                .with_expectation(data_module_expectation),
        ),
        "full-quest" | "full" => TestScenario::new(
            "Full Quest Completion",
            PlaythroughPlan::new(StepOrder::InOrder)
                .with_player("Avery Analyst")
                .with_expectation(full_quest_expectation),
        ),
        "idempotence" | "repeats" => TestScenario::new(
            "Repeated Completion Idempotence",
            PlaythroughPlan::new(StepOrder::Shuffled)
                .with_player("Avery Analyst")
                .with_repeats(0.5)
                .with_expectation(idempotence_expectation),
        ),
        "persistence" | "reload" => TestScenario::new(
            "Save and Reload Round Trip",
            PlaythroughPlan::new(StepOrder::Shuffled)
                .with_player("Avery Analyst")
                .with_reloads()
                .with_expectation(persistence_expectation)
                .with_expectation(full_quest_expectation),
        ),
        "reset" => TestScenario::new(
            "Reset Midway",
            PlaythroughPlan::new(StepOrder::Shuffled)
                .with_player("Riley")
                .with_reset_after(10)
                .with_expectation(reset_expectation),
        ),
        "unknown-module" | "unknown" => TestScenario::new(
            "Unknown Module Tolerance",
            PlaythroughPlan::new(StepOrder::Shuffled)
                .with_unknown_steps(3)
                .with_expectation(unknown_module_expectation),
        ),
        "out-of-range" => TestScenario::new(
            "Out-of-Range Step Rejection",
            PlaythroughPlan::new(StepOrder::Shuffled)
                .with_out_of_range_steps(4)
                .with_expectation(out_of_range_expectation),
        ),
        "certificate-gate" | "certificate" => TestScenario::new(
            "Certificate Requires Name",
            PlaythroughPlan::new(StepOrder::InOrder).with_expectation(certificate_gate_expectation),
        ),
        "random-playthrough" | "random" => TestScenario::new(
            "Random Partial Playthrough",
            PlaythroughPlan::new(StepOrder::Partial)
                .with_repeats(0.3)
                .with_reloads()
                .with_expectation(persistence_expectation)
                .with_expectation(random_playthrough_expectation),
        ),
        _ => return None,
    };
    Some(scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("data-module", "Data Module Badge"),
        ("full-quest", "Full Quest Completion"),
        ("idempotence", "Repeated Completion Idempotence"),
        ("persistence", "Save and Reload Round Trip"),
        ("reset", "Reset Midway"),
        ("unknown-module", "Unknown Module Tolerance"),
        ("out-of-range", "Out-of-Range Step Rejection"),
        ("certificate-gate", "Certificate Requires Name"),
        ("random-playthrough", "Random Partial Playthrough"),
    ]
}
