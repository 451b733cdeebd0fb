//! Page-level configuration.
//!
//! # Design
//! - Every field has a default so pages without a config block still work.
//! - Pages may override fields with a JSON document embedded in the markup.
//! - Validation happens once at boot; controllers trust the result.

use crate::error::ConfigError;
use serde::Deserialize;

/// Default number of reviews per page.
pub const DEFAULT_REVIEWS_PER_PAGE: u32 = 5;
/// Largest page size the reviews endpoint is asked for.
pub const MAX_REVIEWS_PER_PAGE: u32 = 50;
/// Default login route.
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Label used for the local user when the page exposes no username.
pub const DEFAULT_ANONYMOUS_LABEL: &str = "You";
/// Default tracing filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration for the page controllers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Prefix prepended to every API path (empty for same-origin).
    pub api_base: String,
    /// Login route used for 401 redirects.
    pub login_path: String,
    /// Page size for the review list.
    pub reviews_per_page: u32,
    /// Fallback display name for optimistic review entries.
    pub anonymous_label: String,
    /// Tracing filter directive.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            reviews_per_page: DEFAULT_REVIEWS_PER_PAGE,
            anonymous_label: DEFAULT_ANONYMOUS_LABEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl UiConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::InvalidField`] when a value fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_REVIEWS_PER_PAGE).contains(&self.reviews_per_page) {
            return Err(ConfigError::InvalidField {
                field: "reviews_per_page",
                value: self.reviews_per_page.to_string(),
                reason: "out_of_range",
            });
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::InvalidField {
                field: "login_path",
                value: self.login_path.clone(),
                reason: "must_be_absolute",
            });
        }
        if self.anonymous_label.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "anonymous_label",
                value: self.anonymous_label.clone(),
                reason: "empty",
            });
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "log_level",
                value: self.log_level.clone(),
                reason: "empty",
            });
        }
        Ok(())
    }
}
