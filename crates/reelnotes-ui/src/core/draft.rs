//! Review form draft parsing and submit gating.
//!
//! # Design
//! - Keep raw form inputs as strings; convert only when submitting.
//! - A draft must carry at least one of: review text, rating, like.

use crate::core::film::Rating;
use crate::error::DraftError;
use reelnotes_api_models::InteractionRequest;

/// Maximum review length in characters, after trimming.
pub const REVIEW_MAX_CHARS: usize = 1000;

/// Raw values read from the interaction form.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DraftFields {
    /// Rating select value (`""` or `"1"`..`"5"`).
    pub rating: String,
    /// Whether the like checkbox is checked.
    pub liked: bool,
    /// Review textarea contents, untrimmed.
    pub review: String,
}

/// Counter text and submit enablement for the current form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftStatus {
    /// Character counter, e.g. `12 / 1000`.
    pub counter: String,
    /// Whether the submit control may be pressed.
    pub submit_enabled: bool,
}

/// Compute the counter and submit state without validating the fields.
#[must_use]
pub fn draft_status(fields: &DraftFields) -> DraftStatus {
    let len = fields.review.trim().chars().count();
    DraftStatus {
        counter: format!("{len} / {REVIEW_MAX_CHARS}"),
        submit_enabled: len > 0 || !fields.rating.trim().is_empty() || fields.liked,
    }
}

/// Validated interaction draft ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: Option<Rating>,
    liked: bool,
    review: String,
}

impl ReviewDraft {
    /// Validate raw form fields.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::InvalidRating`] for a non-empty rating outside
    /// 1..=5 and [`DraftError::ReviewTooLong`] when the trimmed review exceeds
    /// [`REVIEW_MAX_CHARS`].
    pub fn from_fields(fields: &DraftFields) -> Result<Self, DraftError> {
        let raw_rating = fields.rating.trim();
        let rating = if raw_rating.is_empty() {
            None
        } else {
            let parsed = raw_rating
                .parse::<u8>()
                .ok()
                .and_then(Rating::new)
                .ok_or_else(|| DraftError::InvalidRating {
                    value: raw_rating.to_string(),
                })?;
            Some(parsed)
        };
        let review = fields.review.trim().to_string();
        let len = review.chars().count();
        if len > REVIEW_MAX_CHARS {
            return Err(DraftError::ReviewTooLong {
                len,
                max: REVIEW_MAX_CHARS,
            });
        }
        Ok(Self {
            rating,
            liked: fields.liked,
            review,
        })
    }

    /// Whether the draft carries any content worth sending.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.review.is_empty() || self.rating.is_some() || self.liked
    }

    /// Selected rating.
    #[must_use]
    pub const fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Like flag.
    #[must_use]
    pub const fn liked(&self) -> bool {
        self.liked
    }

    /// Trimmed review text (possibly empty).
    #[must_use]
    pub fn review(&self) -> &str {
        &self.review
    }

    /// Wire body for the interaction endpoint.
    #[must_use]
    pub fn to_request(&self) -> InteractionRequest {
        InteractionRequest {
            rating: self.rating.map(Rating::get),
            liked: self.liked,
            review: self.review.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(rating: &str, liked: bool, review: &str) -> DraftFields {
        DraftFields {
            rating: rating.to_string(),
            liked,
            review: review.to_string(),
        }
    }

    #[test]
    fn empty_draft_keeps_submit_disabled() {
        let status = draft_status(&fields("", false, "   "));
        assert!(!status.submit_enabled);
        assert_eq!(status.counter, "0 / 1000");
    }

    #[test]
    fn any_single_piece_of_content_enables_submit() {
        assert!(draft_status(&fields("3", false, "")).submit_enabled);
        assert!(draft_status(&fields("", true, "")).submit_enabled);
        assert!(draft_status(&fields("", false, " ok ")).submit_enabled);
    }

    #[test]
    fn counter_counts_trimmed_characters() {
        assert_eq!(draft_status(&fields("", false, "  好电影  ")).counter, "3 / 1000");
    }

    #[test]
    fn parses_rating_and_trims_review() {
        let draft = ReviewDraft::from_fields(&fields("4", true, "  Great film \n"))
            .expect("valid draft");
        assert_eq!(draft.rating().map(Rating::get), Some(4));
        assert_eq!(draft.review(), "Great film");
        let body = draft.to_request();
        assert_eq!(body.rating, Some(4));
        assert!(body.liked);
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let err = ReviewDraft::from_fields(&fields("9", false, "")).expect_err("bad rating");
        assert_eq!(
            err,
            DraftError::InvalidRating {
                value: "9".to_string()
            }
        );
    }

    #[test]
    fn rejects_overlong_review() {
        let long = "x".repeat(REVIEW_MAX_CHARS + 1);
        let err = ReviewDraft::from_fields(&fields("", false, &long)).expect_err("too long");
        assert!(matches!(err, DraftError::ReviewTooLong { len: 1001, .. }));
        let exact = "y".repeat(REVIEW_MAX_CHARS);
        assert!(ReviewDraft::from_fields(&fields("", false, &exact)).is_ok());
    }

    #[test]
    fn empty_draft_has_no_content() {
        let draft = ReviewDraft::from_fields(&fields("", false, "")).expect("valid");
        assert!(!draft.has_content());
    }
}
