//! Static module and badge catalog
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points credited for a step whose module is not in the catalog.
pub const DEFAULT_STEP_POINTS: u32 = 25;

/// Tutorial modules, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Data,
    Visual,
    Format,
    Interactive,
    Publish,
}

impl ModuleId {
    pub const ALL: [Self; 5] = [
        Self::Data,
        Self::Visual,
        Self::Format,
        Self::Interactive,
        Self::Publish,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Visual => "visual",
            Self::Format => "format",
            Self::Interactive => "interactive",
            Self::Publish => "publish",
        }
    }

    /// Catalog entry for this module.
    #[must_use]
    pub fn config(self) -> &'static ModuleConfig {
        &MODULES[self as usize]
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a module id is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module id: {0}")]
pub struct UnknownModule(pub String);

impl FromStr for ModuleId {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

/// Achievement badges, one per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeId {
    Data,
    Visual,
    Design,
    Interactive,
    Publisher,
}

impl BadgeId {
    pub const ALL: [Self; 5] = [
        Self::Data,
        Self::Visual,
        Self::Design,
        Self::Interactive,
        Self::Publisher,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Visual => "visual",
            Self::Design => "design",
            Self::Interactive => "interactive",
            Self::Publisher => "publisher",
        }
    }

    /// Name shown when the badge unlocks.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Data => "Data Master",
            Self::Visual => "Visual Expert",
            Self::Design => "Design Guru",
            Self::Interactive => "Interactive Pro",
            Self::Publisher => "Publishing Hero",
        }
    }

    /// The module whose completion unlocks this badge.
    #[must_use]
    pub const fn module(self) -> ModuleId {
        match self {
            Self::Data => ModuleId::Data,
            Self::Visual => ModuleId::Visual,
            Self::Design => ModuleId::Format,
            Self::Interactive => ModuleId::Interactive,
            Self::Publisher => ModuleId::Publish,
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static configuration for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleConfig {
    pub id: ModuleId,
    /// Steps required to earn the badge
    pub steps: u32,
    /// Points credited per completed step
    pub points: u32,
    pub badge: BadgeId,
}

impl ModuleConfig {
    /// Points earned by completing every step of this module.
    #[must_use]
    pub const fn max_points(&self) -> u32 {
        self.steps * self.points
    }

    #[must_use]
    pub const fn contains_step(&self, step: u32) -> bool {
        step >= 1 && step <= self.steps
    }
}

pub static MODULES: [ModuleConfig; 5] = [
    ModuleConfig {
        id: ModuleId::Data,
        steps: 4,
        points: 25,
        badge: BadgeId::Data,
    },
    ModuleConfig {
        id: ModuleId::Visual,
        steps: 5,
        points: 50,
        badge: BadgeId::Visual,
    },
    ModuleConfig {
        id: ModuleId::Format,
        steps: 4,
        points: 30,
        badge: BadgeId::Design,
    },
    ModuleConfig {
        id: ModuleId::Interactive,
        steps: 3,
        points: 75,
        badge: BadgeId::Interactive,
    },
    ModuleConfig {
        id: ModuleId::Publish,
        steps: 3,
        points: 40,
        badge: BadgeId::Publisher,
    },
];

/// Sum of every module's required step count.
#[must_use]
pub fn total_steps() -> u32 {
    MODULES.iter().map(|cfg| cfg.steps).sum()
}

/// Highest score reachable through normal play.
#[must_use]
pub fn max_points() -> u32 {
    MODULES.iter().map(ModuleConfig::max_points).sum()
}

/// Per-step points for a raw module id, falling back to [`DEFAULT_STEP_POINTS`].
#[must_use]
pub fn points_for(module: &str) -> u32 {
    module
        .parse::<ModuleId>()
        .map_or(DEFAULT_STEP_POINTS, |id| id.config().points)
}
