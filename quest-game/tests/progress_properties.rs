use chrono::{DateTime, TimeZone, Utc};
use quest_game::{
    BadgeId, GameState, MODULES, MemoryStore, ModuleId, PersistenceAdapter, ProgressTracker,
    SaveTrigger, StepId, TrackerEvent, decode_state, encode_state, total_steps,
};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

const SEEDS: [u64; 6] = [1, 7, 42, 1337, 0xBEEF, 0xDEAD_BEEF];

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 9, 15, 0).unwrap()
}

fn all_steps() -> Vec<(ModuleId, u32)> {
    MODULES
        .iter()
        .flat_map(|cfg| (1..=cfg.steps).map(move |n| (cfg.id, n)))
        .collect()
}

/// Every step once in shuffled order, with some steps repeated along the way.
fn shuffled_plan(seed: u64) -> Vec<(ModuleId, u32)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut plan = all_steps();
    plan.shuffle(&mut rng);
    let repeats: Vec<_> = plan.choose_multiple(&mut rng, 6).copied().collect();
    plan.extend(repeats);
    plan
}

fn assert_invariants(state: &GameState) {
    let mut expected_points = 0;
    for cfg in &MODULES {
        let done = state
            .completed_steps
            .iter()
            .filter(|step| step.module_id() == Some(cfg.id))
            .count();
        let progress = state.module_progress.get(cfg.id);
        assert_eq!(usize::try_from(progress).unwrap(), done);
        assert!(progress <= cfg.steps);
        assert_eq!(state.badges.is_unlocked(cfg.badge), progress >= cfg.steps);
        expected_points += progress * cfg.points;
    }
    assert_eq!(state.total_points, expected_points);
    assert_eq!(state.game_completed, state.badges.all_unlocked());
    assert_eq!(state.completion_date.is_some(), state.game_completed);
}

#[test]
fn random_playthroughs_hold_invariants() {
    for seed in SEEDS {
        let plan = shuffled_plan(seed);
        let mut tracker = ProgressTracker::default().with_clock(fixed_clock);
        let mut unlocks = Vec::new();
        let mut completions = 0;

        for (index, (module, number)) in plan.iter().enumerate() {
            let points_before = tracker.state().total_points;
            let outcome = tracker.complete(*module, *number).unwrap();
            if index >= total_steps() as usize {
                assert!(!outcome.newly_completed, "seed {seed}: repeat credited");
                assert_eq!(tracker.state().total_points, points_before);
            }
            if let Some(badge) = outcome.badge_unlocked {
                assert_eq!(badge, module.config().badge);
                assert_eq!(
                    tracker.state().module_progress.get(*module),
                    module.config().steps
                );
                unlocks.push(badge);
            }
            if outcome.game_completed {
                completions += 1;
                assert_eq!(unlocks.len(), BadgeId::ALL.len());
            }
            assert_invariants(tracker.state());
        }

        unlocks.sort();
        assert_eq!(unlocks, BadgeId::ALL.to_vec(), "seed {seed}");
        assert_eq!(completions, 1, "seed {seed}");
        assert_eq!(tracker.state().total_points, quest_game::max_points());
        assert_eq!(tracker.state().completion_date, Some(fixed_clock()));
    }
}

#[test]
fn completion_date_is_stamped_once() {
    fn later_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    let mut tracker = ProgressTracker::default().with_clock(fixed_clock);
    for (module, number) in all_steps() {
        tracker.complete(module, number).unwrap();
    }
    let mut tracker = tracker.with_clock(later_clock);
    tracker.complete_step("bonus", 1).unwrap();
    tracker.complete(ModuleId::Data, 1).unwrap();
    assert_eq!(tracker.state().completion_date, Some(fixed_clock()));
}

#[test]
fn save_load_round_trips_reachable_states() {
    for seed in SEEDS {
        let plan = shuffled_plan(seed);
        let mut tracker = ProgressTracker::default().with_clock(fixed_clock);
        tracker.set_player_name(format!("Player {seed}"));
        let adapter = PersistenceAdapter::new(MemoryStore::new());

        for (module, number) in plan {
            tracker.complete(module, number).unwrap();
            assert!(adapter.save(tracker.state(), SaveTrigger::Mutation));
            let loaded = adapter.load().unwrap();
            assert_eq!(&loaded, tracker.state());
        }
        let json = encode_state(tracker.state()).unwrap();
        assert_eq!(&decode_state(&json).unwrap(), tracker.state());
    }
}

#[test]
fn reset_always_returns_to_zero() {
    for seed in SEEDS {
        let mut tracker = ProgressTracker::default().with_clock(fixed_clock);
        let plan = shuffled_plan(seed);
        let cut = usize::try_from(seed % 25).unwrap();
        for (module, number) in plan.into_iter().take(cut) {
            tracker.complete(module, number).unwrap();
        }
        let request = tracker.request_reset();
        tracker.reset(request, "Kai");

        let state = tracker.state();
        assert_eq!(state.total_points, 0);
        assert_eq!(state.badges.unlocked_count(), 0);
        for id in ModuleId::ALL {
            assert_eq!(state.module_progress.get(id), 0);
        }
        assert!(state.completed_steps.is_empty());
        assert!(!state.game_completed);
        assert_eq!(state.completion_date, None);
        assert_eq!(state.player_name, "Kai");
    }
}

#[test]
fn badge_unlock_is_reported_exactly_once_per_module() {
    let mut tracker = ProgressTracker::default();
    let mut events = Vec::new();
    for number in 1..=5 {
        events.extend(tracker.complete(ModuleId::Visual, number).unwrap().events());
    }
    for number in 1..=5 {
        events.extend(tracker.complete(ModuleId::Visual, number).unwrap().events());
    }
    let unlocks = events
        .iter()
        .filter(|event| matches!(event, TrackerEvent::BadgeUnlocked { .. }))
        .count();
    assert_eq!(unlocks, 1);
    assert!(tracker.state().is_step_completed(&StepId::of(ModuleId::Visual, 5)));
}
