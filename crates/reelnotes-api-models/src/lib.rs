#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Reelnotes review API.
//!
//! The film pages talk to a handful of JSON endpoints (`/api/like`,
//! `/api/interaction`, `/api/reviews`). These types mirror the payloads the
//! server emits so the browser client can decode them without guessing. Every
//! response envelope carries a `success` flag and an optional `message`; the
//! [`Acknowledged`] trait exposes both uniformly so the HTTP shim can reject
//! `success: false` payloads in one place.
use serde::{Deserialize, Serialize};

/// Common view over the `{success, message}` envelope shared by every endpoint.
pub trait Acknowledged {
    /// Whether the server reported the operation as successful.
    fn succeeded(&self) -> bool;
    /// Server supplied message, if any.
    fn message(&self) -> Option<&str>;
}

/// Response to `POST /api/like/{film_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LikeToggleResponse {
    /// Application-level success flag.
    #[serde(default)]
    pub success: bool,
    /// Like state after the toggle.
    #[serde(default)]
    pub liked: bool,
    /// Film like count after the toggle.
    #[serde(default)]
    pub like_count: u64,
    /// Human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledged for LikeToggleResponse {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Body of `POST /api/interaction/{film_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionRequest {
    /// Rating in the 1..=5 range, or `null` to clear it.
    pub rating: Option<u8>,
    /// Whether the film is liked.
    pub liked: bool,
    /// Trimmed review text; empty clears the review.
    pub review: String,
}

/// Aggregate film statistics recomputed by the server after a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FilmStats {
    /// Mean rating, `null` or `0` when the film has no ratings.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Number of likes.
    #[serde(default)]
    pub like_count: u64,
    /// Number of ratings.
    #[serde(default)]
    pub rating_count: u64,
}

/// Author block of a review entry.
///
/// Older payloads inline the username as a plain string instead of an object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReviewAuthor {
    /// Structured user reference.
    Profile {
        /// Numeric user identifier.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        /// Display name; may be missing for deleted accounts.
        #[serde(default)]
        username: Option<String>,
    },
    /// Bare username.
    Name(String),
}

impl ReviewAuthor {
    /// Display name for the author when known.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Profile { username, .. } => username.as_deref(),
            Self::Name(name) => Some(name.as_str()),
        }
        .filter(|name| !name.trim().is_empty())
    }
}

/// One review as returned by the list endpoint or echoed after a save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewDto {
    /// Composite identifier (`{user_id}-{film_id}`) when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Review author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ReviewAuthor>,
    /// Rating attached to the review.
    #[serde(default)]
    pub rating: Option<u8>,
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Review body.
    #[serde(default, alias = "text")]
    pub review_text: Option<String>,
}

/// `data` block of a successful interaction save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InteractionData {
    /// Stored rating.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Stored like flag.
    #[serde(default)]
    pub liked: bool,
    /// Whether a non-empty review is stored.
    #[serde(default)]
    pub has_review: bool,
    /// Stored review text.
    #[serde(default)]
    pub review_text: Option<String>,
    /// Creation timestamp of the interaction.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Review as it will appear in the list, when the server includes it.
    #[serde(default)]
    pub review: Option<ReviewDto>,
    /// Alternative spelling of [`Self::review`] used by older servers.
    #[serde(default)]
    pub interaction: Option<ReviewDto>,
    /// Film aggregates after the save.
    #[serde(default)]
    pub film_stats: Option<FilmStats>,
}

impl InteractionData {
    /// Server-confirmed review object, preferring `review` over `interaction`.
    #[must_use]
    pub fn confirmed_review(&self) -> Option<&ReviewDto> {
        match (&self.review, &self.interaction) {
            (Some(review), _) | (None, Some(review)) => Some(review),
            (None, None) => None,
        }
    }
}

/// Response to `POST /api/interaction/{film_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InteractionResponse {
    /// Application-level success flag.
    #[serde(default)]
    pub success: bool,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Stored interaction and refreshed stats.
    #[serde(default)]
    pub data: Option<InteractionData>,
}

impl Acknowledged for InteractionResponse {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Bare `{success, message}` envelope (delete responses).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Acknowledgement {
    /// Application-level success flag.
    #[serde(default)]
    pub success: bool,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
}

impl Acknowledged for Acknowledgement {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Response to `GET /api/reviews/{film_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReviewsResponse {
    /// Application-level success flag.
    #[serde(default)]
    pub success: bool,
    /// Reviews on the requested page, newest first.
    #[serde(default)]
    pub data: Vec<ReviewDto>,
    /// Echo of the requested page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Echo of the requested page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Total number of reviews for the film.
    #[serde(default)]
    pub total: u64,
    /// Optional failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledged for ReviewsResponse {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
