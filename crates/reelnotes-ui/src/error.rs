//! Error types for the page controllers.
//!
//! # Design
//! - One enum per concern: HTTP, form drafts, configuration, storage, logging.
//! - `Display` text of [`ApiError`] is what the user sees in the notice area.

use thiserror::Error;

/// Classified failure of an API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The session is not authenticated; the browser must go to the login page.
    #[error("authentication required")]
    AuthRequired {
        /// Login URL to navigate to.
        redirect_to: String,
    },
    /// The server answered with something other than JSON (usually an HTML page).
    #[error("Operation failed ({status})")]
    UnexpectedContent {
        /// HTTP status of the response.
        status: u16,
    },
    /// The body claimed to be JSON but did not decode.
    #[error("Unexpected server response, please retry")]
    Malformed {
        /// HTTP status of the response.
        status: u16,
        /// Decoder error detail.
        detail: String,
    },
    /// The server decoded fine but reported `success: false`.
    #[error("{}", .message.as_deref().unwrap_or("Request was rejected"))]
    Rejected {
        /// HTTP status of the response.
        status: u16,
        /// Server supplied message.
        message: Option<String>,
    },
    /// The request never completed.
    #[error("Network error, please retry")]
    Network {
        /// Transport error detail.
        detail: String,
    },
}

impl ApiError {
    /// Message to show for this failure, falling back to `generic` when the
    /// server rejected the call without explaining why.
    #[must_use]
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            Self::Rejected { message: None, .. } => generic.to_string(),
            other => other.to_string(),
        }
    }
}

/// Review form input that cannot be submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    /// Rating was not empty and not an integer in 1..=5.
    #[error("Rating must be between 1 and 5")]
    InvalidRating {
        /// Raw rating input.
        value: String,
    },
    /// Review text exceeds the length limit after trimming.
    #[error("Review is too long ({len} / {max} characters)")]
    ReviewTooLong {
        /// Trimmed length in characters.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },
}

/// Invalid UI configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration blob was not valid JSON for [`crate::UiConfig`].
    #[error("invalid configuration document")]
    Parse {
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A field held an unusable value.
    #[error("invalid configuration field `{field}`: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Preference storage failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store refused the write (quota, private mode, ...).
    #[error("storage write failed for `{key}`: {detail}")]
    Write {
        /// Storage key.
        key: String,
        /// Backend detail.
        detail: String,
    },
    /// A value could not be encoded for storage.
    #[error("could not encode `{key}`: {detail}")]
    Encode {
        /// Storage key.
        key: String,
        /// Encoder detail.
        detail: String,
    },
}

/// Logging could not be set up.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying installation error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}
