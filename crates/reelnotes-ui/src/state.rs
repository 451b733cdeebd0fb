//! Page-wide UI state owned by the controller.
//!
//! # Design
//! - One plain struct instead of globals scattered over the document.
//! - Borrowed only between await points; never held across a request.

use crate::core::feed::ReviewFeed;
use crate::core::prefs::Preferences;

/// A back navigation waiting to be checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingBack {
    /// Path shown when the back navigation was started.
    pub from: String,
    /// Where to go if the path has not changed by then.
    pub fallback: String,
}

/// Mutable state of the current page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    /// Review list and its load/echo bookkeeping.
    pub feed: ReviewFeed,
    /// Active language and accessibility options.
    pub preferences: Preferences,
    /// Whether the accessibility panel is open.
    pub panel_open: bool,
    /// Whether the mobile navigation is open.
    pub nav_menu_open: bool,
    /// Whether the user dropdown is open.
    pub user_menu_open: bool,
    /// Back navigation in flight, if any.
    pub pending_back: Option<PendingBack>,
}

impl PageState {
    /// Fresh state for a page showing `per_page` reviews at a time.
    #[must_use]
    pub fn new(per_page: u32, preferences: Preferences) -> Self {
        Self {
            feed: ReviewFeed::new(per_page),
            preferences,
            panel_open: false,
            nav_menu_open: false,
            user_menu_open: false,
            pending_back: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_on_first_page() {
        let state = PageState::new(5, Preferences::default());
        assert!(!state.panel_open);
        assert!(!state.nav_menu_open && !state.user_menu_open);
        assert_eq!(state.pending_back, None);
        assert_eq!(state.feed.page(), 1);
        assert_eq!(state.feed.per_page(), 5);
    }
}
