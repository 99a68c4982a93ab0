//! Power BI Quest engine
//!
//! Platform-agnostic progress logic for the Power BI Quest tutorial tracker.
//! This crate owns the step/badge rules and snapshot persistence without any
//! UI or browser dependencies.

pub mod catalog;
pub mod certificate;
pub mod pdf;
pub mod persistence;
pub mod state;
pub mod tracker;

// Re-export commonly used types
pub use catalog::{
    BadgeId, DEFAULT_STEP_POINTS, MODULES, ModuleConfig, ModuleId, UnknownModule, max_points,
    points_for, total_steps,
};
pub use certificate::{CertificateData, CertificateError, CertificateLayout, issue_certificate};
pub use pdf::PdfError;
pub use persistence::{
    AUTOSAVE_INTERVAL, KeyValueStore, MemoryStore, PersistError, PersistenceAdapter,
    STORAGE_KEY, SaveTrigger, Snapshot, StoreError, decode_state, encode_state,
};
pub use state::{Badges, GameState, InvalidStepId, ModuleProgress, StepId};
pub use tracker::{
    Clock, ProgressTracker, ResetRequest, StepOutcome, TrackerError, TrackerEvent,
};

/// Tracker wired to a store: every mutation is followed by a save.
#[derive(Debug)]
pub struct QuestEngine<S: KeyValueStore> {
    tracker: ProgressTracker,
    persistence: PersistenceAdapter<S>,
}

impl<S: KeyValueStore> QuestEngine<S> {
    /// Start from whatever `store` holds, or a fresh state.
    pub fn open(store: S) -> Self {
        let persistence = PersistenceAdapter::new(store);
        let state = persistence.load_or_default();
        Self {
            tracker: ProgressTracker::new(state),
            persistence,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.tracker = self.tracker.with_clock(clock);
        self
    }

    pub const fn state(&self) -> &GameState {
        self.tracker.state()
    }

    pub const fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub const fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    /// Complete a step and save if anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the step number is not valid for the module.
    pub fn complete_step(&mut self, module: &str, number: u32) -> Result<StepOutcome, TrackerError> {
        let outcome = self.tracker.complete_step(module, number)?;
        if outcome.newly_completed {
            self.persistence.save(self.tracker.state(), SaveTrigger::Mutation);
        }
        Ok(outcome)
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.tracker.set_player_name(name);
        self.persistence.save(self.tracker.state(), SaveTrigger::NameChange);
    }

    #[must_use]
    pub fn request_reset(&self) -> ResetRequest {
        self.tracker.request_reset()
    }

    pub fn reset(&mut self, request: ResetRequest, player_name: impl Into<String>) {
        self.tracker.reset(request, player_name);
        self.persistence.save(self.tracker.state(), SaveTrigger::Mutation);
    }

    /// Timer-driven save.
    pub fn autosave(&self) -> bool {
        self.persistence.save(self.tracker.state(), SaveTrigger::Interval)
    }

    /// Final save before the host goes away.
    pub fn shutdown(&self) -> bool {
        self.persistence.save(self.tracker.state(), SaveTrigger::Unload)
    }

    /// # Errors
    ///
    /// Returns an error if the certificate preconditions are not met.
    pub fn certificate(
        &self,
        issued_on: chrono::NaiveDate,
    ) -> Result<CertificateData, CertificateError> {
        issue_certificate(self.tracker.state(), issued_on)
    }
}
