//! Text for the server-rendered displays the controllers refresh in place.

use reelnotes_api_models::{FilmStats, InteractionData};

/// The signed-in user's own interaction block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnInteractionView {
    /// `Your rating: N/5 ★`, or `None` to leave the rating display untouched.
    pub rating_text: Option<String>,
    /// Whether the "you liked this" badge is visible.
    pub liked: bool,
    /// Review text to show, or `None` to hide the review block.
    pub review_text: Option<String>,
}

impl From<&InteractionData> for OwnInteractionView {
    fn from(data: &InteractionData) -> Self {
        Self {
            rating_text: data
                .rating
                .filter(|rating| *rating > 0)
                .map(|rating| format!("Your rating: {rating}/5 ★")),
            liked: data.liked,
            review_text: data
                .has_review
                .then(|| data.review_text.clone().unwrap_or_default()),
        }
    }
}

/// Film aggregate labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilmStatsView {
    /// Average with one decimal, or `None` when the film has no ratings yet.
    pub average_rating: Option<String>,
    /// `N likes`.
    pub likes: String,
    /// `(N ratings)`.
    pub rating_count: String,
}

impl From<&FilmStats> for FilmStatsView {
    fn from(stats: &FilmStats) -> Self {
        Self {
            average_rating: stats
                .average_rating
                .filter(|avg| avg.is_finite() && *avg > 0.0)
                .map(|avg| format!("{avg:.1}")),
            likes: format!("{} likes", stats.like_count),
            rating_count: format!("({} ratings)", stats.rating_count),
        }
    }
}

/// Inner markup of a like button.
#[must_use]
pub const fn like_button_markup(liked: bool) -> &'static str {
    if liked {
        r#"<i class="fas fa-heart"></i> <span class="like-label">Liked</span>"#
    } else {
        r#"<i class="fas fa-heart"></i> <span class="like-label">Like</span>"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_view_formats_average_with_one_decimal() {
        let view = FilmStatsView::from(&FilmStats {
            average_rating: Some(4.2),
            like_count: 10,
            rating_count: 5,
        });
        assert_eq!(view.average_rating.as_deref(), Some("4.2"));
        assert_eq!(view.likes, "10 likes");
        assert_eq!(view.rating_count, "(5 ratings)");
    }

    #[test]
    fn zero_average_leaves_rating_untouched() {
        let view = FilmStatsView::from(&FilmStats {
            average_rating: Some(0.0),
            like_count: 0,
            rating_count: 0,
        });
        assert_eq!(view.average_rating, None);
        let view = FilmStatsView::from(&FilmStats::default());
        assert_eq!(view.average_rating, None);
    }

    #[test]
    fn own_view_hides_review_without_text() {
        let view = OwnInteractionView::from(&InteractionData {
            rating: Some(4),
            liked: true,
            has_review: false,
            review_text: None,
            ..InteractionData::default()
        });
        assert_eq!(view.rating_text.as_deref(), Some("Your rating: 4/5 ★"));
        assert!(view.liked);
        assert_eq!(view.review_text, None);
    }

    #[test]
    fn own_view_shows_stored_review() {
        let view = OwnInteractionView::from(&InteractionData {
            has_review: true,
            review_text: Some("Great film".into()),
            ..InteractionData::default()
        });
        assert_eq!(view.rating_text, None);
        assert_eq!(view.review_text.as_deref(), Some("Great film"));
    }

    #[test]
    fn like_markup_reflects_state() {
        assert!(like_button_markup(true).contains("Liked"));
        assert!(!like_button_markup(false).contains("Liked"));
    }
}
