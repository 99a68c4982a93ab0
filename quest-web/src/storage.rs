//! `localStorage` backend for the quest persistence adapter
use quest_game::{KeyValueStore, StoreError};

use crate::dom::{js_error_message, local_storage};

/// Browser `localStorage`, looked up on every call so a page that blocks
/// storage keeps running unsaved instead of failing at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = local_storage().map_err(|e| StoreError::Unavailable(js_error_message(&e)))?;
        storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(js_error_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = local_storage().map_err(|e| StoreError::Unavailable(js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::WriteRejected(js_error_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let storage = local_storage().map_err(|e| StoreError::Unavailable(js_error_message(&e)))?;
        storage
            .remove_item(key)
            .map_err(|e| StoreError::WriteRejected(js_error_message(&e)))
    }
}
