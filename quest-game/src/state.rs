//! Game state aggregate and derived progress queries
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{BadgeId, ModuleId, total_steps};

/// Identifies one step: a module id plus a 1-based step number.
///
/// The module is kept as raw text so steps from modules outside the catalog
/// can still be recorded. The text form is `"module-step"`, e.g. `"data-3"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StepId {
    module: String,
    number: u32,
}

impl StepId {
    #[must_use]
    pub fn new(module: impl Into<String>, number: u32) -> Self {
        Self {
            module: module.into(),
            number,
        }
    }

    #[must_use]
    pub fn of(module: ModuleId, number: u32) -> Self {
        Self::new(module.as_str(), number)
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Catalog module for this step, if it has one.
    #[must_use]
    pub fn module_id(&self) -> Option<ModuleId> {
        self.module.parse().ok()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.module, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed step id: {0:?}")]
pub struct InvalidStepId(pub String);

impl FromStr for StepId {
    type Err = InvalidStepId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, number) = s
            .rsplit_once('-')
            .ok_or_else(|| InvalidStepId(s.to_string()))?;
        let number: u32 = number.parse().map_err(|_| InvalidStepId(s.to_string()))?;
        if module.is_empty() || number == 0 {
            return Err(InvalidStepId(s.to_string()));
        }
        Ok(Self::new(module, number))
    }
}

impl TryFrom<String> for StepId {
    type Error = InvalidStepId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StepId> for String {
    fn from(value: StepId) -> Self {
        value.to_string()
    }
}

/// Unlock flags for the five badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Badges {
    pub data: bool,
    pub visual: bool,
    pub design: bool,
    pub interactive: bool,
    pub publisher: bool,
}

impl Badges {
    #[must_use]
    pub const fn is_unlocked(&self, badge: BadgeId) -> bool {
        match badge {
            BadgeId::Data => self.data,
            BadgeId::Visual => self.visual,
            BadgeId::Design => self.design,
            BadgeId::Interactive => self.interactive,
            BadgeId::Publisher => self.publisher,
        }
    }

    /// One-way: there is no way to lock a badge short of replacing the whole state.
    pub const fn unlock(&mut self, badge: BadgeId) {
        match badge {
            BadgeId::Data => self.data = true,
            BadgeId::Visual => self.visual = true,
            BadgeId::Design => self.design = true,
            BadgeId::Interactive => self.interactive = true,
            BadgeId::Publisher => self.publisher = true,
        }
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        BadgeId::ALL
            .into_iter()
            .filter(|badge| self.is_unlocked(*badge))
            .count()
    }

    #[must_use]
    pub fn all_unlocked(&self) -> bool {
        BadgeId::ALL.into_iter().all(|badge| self.is_unlocked(badge))
    }
}

/// Completed-step counters per module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleProgress {
    pub data: u32,
    pub visual: u32,
    pub format: u32,
    pub interactive: u32,
    pub publish: u32,
}

impl ModuleProgress {
    #[must_use]
    pub const fn get(&self, module: ModuleId) -> u32 {
        match module {
            ModuleId::Data => self.data,
            ModuleId::Visual => self.visual,
            ModuleId::Format => self.format,
            ModuleId::Interactive => self.interactive,
            ModuleId::Publish => self.publish,
        }
    }

    const fn slot_mut(&mut self, module: ModuleId) -> &mut u32 {
        match module {
            ModuleId::Data => &mut self.data,
            ModuleId::Visual => &mut self.visual,
            ModuleId::Format => &mut self.format,
            ModuleId::Interactive => &mut self.interactive,
            ModuleId::Publish => &mut self.publish,
        }
    }

    /// Bump the counter for `module`, returning the new count.
    pub const fn increment(&mut self, module: ModuleId) -> u32 {
        let slot = self.slot_mut(module);
        *slot += 1;
        *slot
    }
}

/// All mutable progress for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub player_name: String,
    pub total_points: u32,
    pub badges: Badges,
    pub module_progress: ModuleProgress,
    pub completed_steps: BTreeSet<StepId>,
    pub game_completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
}

impl GameState {
    /// A blank state that only carries over the given player name.
    #[must_use]
    pub fn fresh(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_step_completed(&self, step: &StepId) -> bool {
        self.completed_steps.contains(step)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_steps.len()
    }

    /// Share of all catalog steps completed, in percent.
    #[must_use]
    pub fn overall_percent(&self) -> f64 {
        let total = f64::from(total_steps());
        #[allow(clippy::cast_precision_loss)]
        let done = self.completed_steps.len() as f64;
        (done / total * 100.0).min(100.0)
    }

    /// Label used by the overall progress bar, e.g. `"42% Complete"`.
    #[must_use]
    pub fn overall_label(&self) -> String {
        format!("{:.0}% Complete", self.overall_percent())
    }

    #[must_use]
    pub fn module_percent(&self, module: ModuleId) -> f64 {
        let steps = f64::from(module.config().steps);
        f64::from(self.module_progress.get(module)) / steps * 100.0
    }

    /// Status line such as `"2/4 Steps Complete"`.
    #[must_use]
    pub fn module_status(&self, module: ModuleId) -> String {
        format!(
            "{}/{} Steps Complete",
            self.module_progress.get(module),
            module.config().steps
        )
    }

    #[must_use]
    pub fn has_player_name(&self) -> bool {
        !self.player_name.trim().is_empty()
    }

    #[must_use]
    pub fn certificate_eligible(&self) -> bool {
        self.badges.all_unlocked() && self.has_player_name()
    }
}
