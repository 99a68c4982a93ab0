//! Snapshot encoding and best-effort save/load against a key-value store
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

use crate::state::{Badges, GameState, ModuleProgress, StepId};

/// Key the snapshot is stored under.
pub const STORAGE_KEY: &str = "powerbi-quest-state";

/// How often the host should call [`PersistenceAdapter::save`] on a timer.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed storage such as browser `localStorage`.
pub trait KeyValueStore {
    /// Read the value for `key`, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the write (e.g. quota exceeded).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be modified.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used by the CLI and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    /// When set, every write fails with this message.
    fail_writes: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes, for exercising the failure path.
    #[must_use]
    pub fn read_only(reason: impl Into<String>) -> Self {
        Self {
            entries: RefCell::default(),
            fail_writes: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(reason) = &self.fail_writes {
            return Err(StoreError::WriteRejected(reason.clone()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// Persisted shape of [`GameState`].
///
/// Every field falls back to the fresh-state default when missing, so an
/// older snapshot loads cleanly into a newer schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub player_name: String,
    pub total_points: u32,
    pub badges: Badges,
    pub module_progress: ModuleProgress,
    /// Step ids in `"module-step"` text form
    pub completed_steps: Vec<String>,
    pub game_completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            player_name: state.player_name.clone(),
            total_points: state.total_points,
            badges: state.badges,
            module_progress: state.module_progress,
            completed_steps: state
                .completed_steps
                .iter()
                .map(ToString::to_string)
                .collect(),
            game_completed: state.game_completed,
            completion_date: state.completion_date,
        }
    }
}

impl Snapshot {
    /// Rebuild the state, turning the step list back into a set.
    /// Entries that do not parse as step ids are skipped.
    #[must_use]
    pub fn into_state(self) -> GameState {
        let completed_steps: BTreeSet<StepId> = self
            .completed_steps
            .iter()
            .filter_map(|raw| match raw.parse::<StepId>() {
                Ok(step) => Some(step),
                Err(err) => {
                    log::warn!("dropping stored step: {err}");
                    None
                }
            })
            .collect();
        GameState {
            player_name: self.player_name,
            total_points: self.total_points,
            badges: self.badges,
            module_progress: self.module_progress,
            completed_steps,
            game_completed: self.game_completed,
            completion_date: self.completion_date,
        }
    }
}

/// Encode a state as snapshot JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_state(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Snapshot::from(state))
}

/// Decode snapshot JSON into a state.
///
/// # Errors
///
/// Returns an error if the text is not a snapshot object.
pub fn decode_state(json: &str) -> Result<GameState, serde_json::Error> {
    serde_json::from_str::<Snapshot>(json).map(Snapshot::into_state)
}

/// Why a save happened, for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Mutation,
    NameChange,
    Interval,
    Unload,
}

impl fmt::Display for SaveTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mutation => "mutation",
            Self::NameChange => "name change",
            Self::Interval => "autosave",
            Self::Unload => "unload",
        };
        f.write_str(label)
    }
}

/// Saves and loads snapshots under [`STORAGE_KEY`]. Never fails outward:
/// problems are logged and reported as `false` / `None`.
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the state; returns whether it was stored.
    pub fn save(&self, state: &GameState, trigger: SaveTrigger) -> bool {
        match self.try_save(state) {
            Ok(()) => {
                log::debug!("saved progress ({trigger})");
                true
            }
            Err(err) => {
                log::error!("Failed to save game state ({trigger}): {err}");
                false
            }
        }
    }

    fn try_save(&self, state: &GameState) -> Result<(), PersistError> {
        let json = encode_state(state)?;
        self.store.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Read the stored state, `None` if absent or unreadable.
    pub fn load(&self) -> Option<GameState> {
        match self.try_load() {
            Ok(Some(state)) => {
                log::info!(
                    "loaded progress: {} points, {} steps",
                    state.total_points,
                    state.completed_steps.len()
                );
                Some(state)
            }
            Ok(None) => None,
            Err(err) => {
                log::error!("Failed to load game state: {err}");
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<GameState>, PersistError> {
        let Some(json) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(decode_state(&json)?))
    }

    /// Stored state, or a fresh default.
    pub fn load_or_default(&self) -> GameState {
        self.load().unwrap_or_default()
    }

    /// Remove the stored snapshot; returns whether it succeeded.
    pub fn clear(&self) -> bool {
        match self.store.remove_item(&self.key) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Failed to clear game state: {err}");
                false
            }
        }
    }
}
