//! Display preferences and their persistence.
//!
//! # Design
//! - Storage is injected through [`KeyValueStore`]; the browser build backs it
//!   with `localStorage`, tests with a map.
//! - Keys and value formats match what earlier page scripts wrote, so
//!   returning visitors keep their settings.
//! - Unreadable stored values are logged and replaced by defaults.

use crate::error::StorageError;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use serde::{Deserialize, Serialize};

/// Storage key of the language code (stored as a bare string).
pub const LANGUAGE_KEY: &str = "language";
/// Storage key of the accessibility preferences (stored as JSON).
pub const ACCESSIBILITY_KEY: &str = "accessibility_preferences";

/// Smallest font scale.
pub const FONT_SCALE_MIN: f64 = 0.7;
/// Largest font scale.
pub const FONT_SCALE_MAX: f64 = 2.0;
/// Step used by the larger/smaller text buttons.
pub const FONT_SCALE_STEP: f64 = 0.1;

/// String key/value storage.
pub trait KeyValueStore {
    /// Read a raw value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Accessibility options persisted per browser.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityPrefs {
    /// High contrast colour scheme.
    pub high_contrast: bool,
    /// Root font scale (1.0 = 100%).
    pub font_size: f64,
    /// Screen-reader friendly layout.
    pub screen_reader_mode: bool,
}

impl Default for AccessibilityPrefs {
    fn default() -> Self {
        Self {
            high_contrast: false,
            font_size: 1.0,
            screen_reader_mode: false,
        }
    }
}

impl AccessibilityPrefs {
    /// Change the font scale by `delta`, clamped to the supported range and
    /// rounded to one decimal. Returns the new scale.
    pub fn adjust_font(&mut self, delta: f64) -> f64 {
        self.font_size = clamp_font_scale(self.font_size + delta);
        self.font_size
    }

    /// Font scale as a whole percentage.
    #[must_use]
    pub fn font_percent(&self) -> u32 {
        // The scale is clamped to [0.7, 2.0], so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.font_size * 100.0).round() as u32;
        percent
    }

    fn normalized(mut self) -> Self {
        self.font_size = clamp_font_scale(self.font_size);
        self
    }
}

fn clamp_font_scale(value: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    (value.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX) * 10.0).round() / 10.0
}

/// Everything the preference panel controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preferences {
    /// Active display language.
    pub language: LocaleCode,
    /// Accessibility options.
    pub accessibility: AccessibilityPrefs,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: DEFAULT_LOCALE,
            accessibility: AccessibilityPrefs::default(),
        }
    }
}

/// Typed access to preferences on top of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Wrap a storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Backing storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load preferences, falling back to defaults for anything unreadable.
    pub fn load(&self) -> Preferences {
        let language = self
            .storage
            .get(LANGUAGE_KEY)
            .and_then(|raw| LocaleCode::from_lang_tag(&raw))
            .unwrap_or(DEFAULT_LOCALE);
        let accessibility = match self.storage.get(ACCESSIBILITY_KEY) {
            None => AccessibilityPrefs::default(),
            Some(raw) => match serde_json::from_str::<AccessibilityPrefs>(&raw) {
                Ok(prefs) => prefs.normalized(),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load accessibility preferences");
                    AccessibilityPrefs::default()
                }
            },
        };
        Preferences {
            language,
            accessibility,
        }
    }

    /// Persist the language code.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn save_language(&self, language: LocaleCode) -> Result<(), StorageError> {
        self.storage.set(LANGUAGE_KEY, language.code())
    }

    /// Persist the accessibility options.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if serialisation fails, otherwise
    /// propagates backend write failures.
    pub fn save_accessibility(&self, prefs: &AccessibilityPrefs) -> Result<(), StorageError> {
        let raw = serde_json::to_string(prefs).map_err(|err| StorageError::Encode {
            key: ACCESSIBILITY_KEY.to_string(),
            detail: err.to_string(),
        })?;
        self.storage.set(ACCESSIBILITY_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn font_scale_is_clamped_and_rounded() {
        let mut prefs = AccessibilityPrefs::default();
        assert!((prefs.adjust_font(FONT_SCALE_STEP) - 1.1).abs() < f64::EPSILON);
        assert_eq!(prefs.font_percent(), 110);
        for _ in 0..20 {
            prefs.adjust_font(FONT_SCALE_STEP);
        }
        assert!((prefs.font_size - FONT_SCALE_MAX).abs() < f64::EPSILON);
        for _ in 0..30 {
            prefs.adjust_font(-FONT_SCALE_STEP);
        }
        assert!((prefs.font_size - FONT_SCALE_MIN).abs() < f64::EPSILON);
        assert_eq!(prefs.font_percent(), 70);
    }

    #[test]
    fn round_trips_through_legacy_keys() {
        let store = PreferenceStore::new(MapStore::default());
        store.save_language(LocaleCode::Zh).expect("save language");
        let prefs = AccessibilityPrefs {
            high_contrast: true,
            font_size: 1.3,
            screen_reader_mode: false,
        };
        store.save_accessibility(&prefs).expect("save prefs");

        assert_eq!(store.storage().get(LANGUAGE_KEY).as_deref(), Some("zh"));
        let raw = store.storage().get(ACCESSIBILITY_KEY).expect("stored json");
        assert!(raw.contains("\"highContrast\":true"));

        let loaded = store.load();
        assert_eq!(loaded.language, LocaleCode::Zh);
        assert_eq!(loaded.accessibility, prefs);
    }

    #[test]
    fn corrupt_values_fall_back_to_defaults() {
        let store = PreferenceStore::new(MapStore::default());
        store
            .storage()
            .set(ACCESSIBILITY_KEY, "{not json")
            .expect("raw set");
        store.storage().set(LANGUAGE_KEY, "xx").expect("raw set");
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn out_of_range_stored_scale_is_clamped() {
        let store = PreferenceStore::new(MapStore::default());
        store
            .storage()
            .set(ACCESSIBILITY_KEY, r#"{"fontSize": 9.0, "screenReaderMode": true}"#)
            .expect("raw set");
        let loaded = store.load().accessibility;
        assert!((loaded.font_size - FONT_SCALE_MAX).abs() < f64::EPSILON);
        assert!(loaded.screen_reader_mode);
        assert!(!loaded.high_contrast);
    }
}
