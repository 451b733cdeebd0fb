//! `localStorage` backend for preferences.

use crate::core::prefs::KeyValueStore;
use crate::error::StorageError;
use gloo::storage::{LocalStorage, Storage};

/// Raw string access to `window.localStorage`.
///
/// Values are stored without JSON quoting so keys written by older page
/// scripts stay readable.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }
}
