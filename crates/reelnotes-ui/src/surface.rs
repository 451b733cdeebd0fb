//! The page as seen by the controllers.
//!
//! # Design
//! - Controllers never touch the DOM; they describe effects through
//!   [`PageSurface`]. The browser build implements it over `web-sys`, tests
//!   implement it with a recorder.
//! - Controls are opaque handles chosen by the implementation.

use crate::core::a11y::ReadableNode;
use crate::core::display::{FilmStatsView, OwnInteractionView};
use crate::core::film::FilmId;
use crate::core::location::PageLocation;
use crate::core::prefs::AccessibilityPrefs;
use crate::i18n::LocaleCode;

/// Severity of a transient notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral information.
    Info,
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

impl NoticeKind {
    /// CSS modifier used by the alert markup.
    #[must_use]
    pub const fn css_modifier(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A transient message shown at the top of the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub text: String,
}

impl Notice {
    /// Success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// Informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

/// Effects the controllers apply to the page.
pub trait PageSurface {
    /// Handle to an interactive element (button, form control).
    type Control: Clone;

    /// Current path and query.
    fn location(&self) -> PageLocation;
    /// Film named by the review form or review list (`data-film-id`).
    fn bound_film(&self) -> Option<FilmId>;
    /// Navigate to `url`.
    fn navigate(&self, url: &str);
    /// Reload the current page.
    fn reload(&self);
    /// Ask the user to confirm; `false` when declined.
    fn confirm(&self, message: &str) -> bool;
    /// Show a transient notice.
    fn notify(&self, notice: &Notice);

    /// Disable `control`, mark it busy and optionally swap its label.
    fn set_busy(&self, control: &Self::Control, label: Option<&str>);
    /// Re-enable `control`, clear the busy marker and optionally restore its label.
    fn release(&self, control: &Self::Control, label: Option<&str>);

    /// Pressed state of `control` and of every other like control bound to
    /// `film`.
    fn set_like_state(&self, film: FilmId, control: &Self::Control, liked: bool);
    /// Text of every like counter bound to `film`.
    fn set_like_count(&self, film: FilmId, count: u64);

    /// Refresh the signed-in user's rating/like/review displays.
    fn show_own_interaction(&self, view: &OwnInteractionView);
    /// Refresh the film aggregate labels.
    fn show_film_stats(&self, view: &FilmStatsView);

    /// Replace the review list markup.
    fn replace_reviews(&self, html: &str);
    /// Replace the pagination markup.
    fn replace_pagination(&self, html: &str);

    /// Username shown in the user menu, if signed in.
    fn current_username(&self) -> Option<String>;
    /// Enable or disable the review form's submit control.
    fn set_submit_enabled(&self, enabled: bool);
    /// Character counter text under the review textarea.
    fn set_char_counter(&self, text: &str);

    /// Mirror the active language into the document.
    fn apply_language(&self, language: LocaleCode);
    /// Apply accessibility classes and font scale.
    fn apply_accessibility(&self, prefs: &AccessibilityPrefs);
    /// Open or close the accessibility panel.
    fn set_panel_open(&self, open: bool);
    /// Post a polite message to the live region.
    fn announce(&self, message: &str);

    /// Move focus to the site search input, if the page has one.
    fn focus_search(&self);
    /// Close every open menu (accessibility panel, mobile navigation).
    fn close_menus(&self);
    /// Open or close the mobile navigation.
    fn set_nav_menu_open(&self, open: bool);
    /// Open or close the user dropdown.
    fn set_user_menu_open(&self, open: bool);
    /// Step back in history; `false` when there is nothing to go back to.
    fn history_back(&self) -> bool;
    /// Show a blocking message.
    fn alert(&self, message: &str);
    /// Readable elements of the main content, in document order.
    fn readable_nodes(&self) -> Vec<ReadableNode>;
    /// Speak `text`; `false` when speech synthesis is unavailable.
    fn speak(&self, text: &str, language: LocaleCode) -> bool;
}

/// Marks a control busy until dropped.
///
/// The label passed to [`BusyGuard::new`] is shown while busy; `idle_label`
/// is restored on release.
pub struct BusyGuard<'a, P: PageSurface> {
    surface: &'a P,
    control: P::Control,
    idle_label: Option<&'static str>,
}

impl<'a, P: PageSurface> BusyGuard<'a, P> {
    /// Mark `control` busy.
    pub fn new(
        surface: &'a P,
        control: &P::Control,
        busy_label: Option<&'static str>,
        idle_label: Option<&'static str>,
    ) -> Self {
        surface.set_busy(control, busy_label);
        Self {
            surface,
            control: control.clone(),
            idle_label,
        }
    }
}

impl<P: PageSurface> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.surface.release(&self.control, self.idle_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Busy {
        log: RefCell<Vec<String>>,
    }

    impl PageSurface for Busy {
        type Control = &'static str;

        fn location(&self) -> PageLocation {
            PageLocation::new("/", "")
        }
        fn bound_film(&self) -> Option<FilmId> {
            None
        }
        fn navigate(&self, _url: &str) {}
        fn reload(&self) {}
        fn confirm(&self, _message: &str) -> bool {
            true
        }
        fn notify(&self, _notice: &Notice) {}
        fn set_busy(&self, control: &Self::Control, label: Option<&str>) {
            self.log
                .borrow_mut()
                .push(format!("busy {control} {}", label.unwrap_or("-")));
        }
        fn release(&self, control: &Self::Control, label: Option<&str>) {
            self.log
                .borrow_mut()
                .push(format!("release {control} {}", label.unwrap_or("-")));
        }
        fn set_like_state(&self, _film: FilmId, _control: &Self::Control, _liked: bool) {}
        fn set_like_count(&self, _film: FilmId, _count: u64) {}
        fn show_own_interaction(&self, _view: &OwnInteractionView) {}
        fn show_film_stats(&self, _view: &FilmStatsView) {}
        fn replace_reviews(&self, _html: &str) {}
        fn replace_pagination(&self, _html: &str) {}
        fn current_username(&self) -> Option<String> {
            None
        }
        fn set_submit_enabled(&self, _enabled: bool) {}
        fn set_char_counter(&self, _text: &str) {}
        fn apply_language(&self, _language: LocaleCode) {}
        fn apply_accessibility(&self, _prefs: &AccessibilityPrefs) {}
        fn set_panel_open(&self, _open: bool) {}
        fn announce(&self, _message: &str) {}
        fn focus_search(&self) {}
        fn close_menus(&self) {}
        fn set_nav_menu_open(&self, _open: bool) {}
        fn set_user_menu_open(&self, _open: bool) {}
        fn history_back(&self) -> bool {
            false
        }
        fn alert(&self, _message: &str) {}
        fn readable_nodes(&self) -> Vec<ReadableNode> {
            Vec::new()
        }
        fn speak(&self, _text: &str, _language: LocaleCode) -> bool {
            false
        }
    }

    #[test]
    fn guard_releases_on_drop() {
        let surface = Busy::default();
        {
            let _guard = BusyGuard::new(&surface, &"save", Some("Saving..."), Some("Save Review"));
            assert_eq!(surface.log.borrow().len(), 1);
        }
        assert_eq!(
            *surface.log.borrow(),
            vec!["busy save Saving...", "release save Save Review"]
        );
    }

    #[test]
    fn notice_kinds_map_to_css() {
        assert_eq!(Notice::error("x").kind.css_modifier(), "error");
        assert_eq!(Notice::success("x").kind.css_modifier(), "success");
        assert_eq!(Notice::info("x").kind, NoticeKind::Info);
    }
}
