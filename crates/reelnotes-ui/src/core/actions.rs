//! Event delegation: map clicked elements and key presses to UI actions.
//!
//! # Design
//! - The browser layer extracts a [`ClickTarget`] from the closest actionable
//!   ancestor and hands it here; nothing in this module touches the DOM.
//! - `data-action` wins; legacy class and id hooks from older templates are
//!   still honoured.

use crate::core::film::FilmId;

/// Selector the browser layer uses to find the actionable ancestor of a click.
pub const ACTIONABLE_SELECTOR: &str = "[data-action], .like-btn, .btn-like, .review-page-btn, \
     #delete-interaction, #lang-toggle, .accessibility-toggle, .close-accessibility, #speak-page, \
     #high-contrast, #increase-font, #decrease-font, #screen-reader-mode, #keyboard-nav, \
     #keyboard-help, .mobile-menu-toggle, .user-menu-trigger, #back-button, .clear-filters, \
     .film-card[data-href], .feature-card[data-href]";

/// Cards that navigate to their `data-href` when activated.
pub const CARD_SELECTOR: &str = ".film-card[data-href], .feature-card[data-href]";

/// Site root, used when there is no history to go back to.
pub const HOME_PATH: &str = "/";
/// Film list without any filter query.
pub const FILMS_PATH: &str = "/films";

/// Attributes of the element a click resolved to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// `data-action` value.
    pub action: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// `data-film-id` value.
    pub film_id: Option<String>,
    /// `data-page` value.
    pub page: Option<String>,
    /// Element id.
    pub id: Option<String>,
    /// `data-href` value of a clickable card.
    pub href: Option<String>,
    /// `data-default-url` value of the back button.
    pub default_url: Option<String>,
    /// The click landed on a link, button or input nested inside the element.
    pub inside_control: bool,
}

impl ClickTarget {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    fn is(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    fn link(&self) -> Option<UiAction> {
        if self.inside_control {
            return None;
        }
        self.href
            .as_deref()
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|href| UiAction::OpenLink(href.to_string()))
    }

    fn back(&self) -> UiAction {
        let fallback = self
            .default_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(HOME_PATH);
        UiAction::GoBack {
            fallback: fallback.to_string(),
        }
    }
}

/// A user intent the controller knows how to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Like/unlike a film.
    ToggleLike(FilmId),
    /// Load a review page.
    ReviewPage {
        /// Film whose reviews are paged.
        film: FilmId,
        /// Page to load.
        page: u32,
    },
    /// Delete the user's own interaction.
    DeleteInteraction,
    /// Switch between English and Chinese.
    ToggleLanguage,
    /// Open or close the accessibility panel.
    TogglePanel,
    /// Close the accessibility panel.
    ClosePanel,
    /// Read the main content aloud.
    ReadPage,
    /// Toggle high contrast.
    ToggleHighContrast,
    /// Larger text.
    IncreaseFont,
    /// Smaller text.
    DecreaseFont,
    /// Toggle screen-reader friendly mode.
    ToggleScreenReader,
    /// Show the keyboard shortcut help.
    ShowShortcuts,
    /// Follow a card's link.
    OpenLink(String),
    /// Open or close the mobile navigation.
    ToggleNavMenu,
    /// Open or close the user dropdown.
    ToggleUserMenu,
    /// Go back in history, or to `fallback` when there is none.
    GoBack {
        /// Where to go instead.
        fallback: String,
    },
    /// Drop every film list filter.
    ClearFilters,
}

/// Resolve a click. `page_film` is the film the current page is about, used
/// when a like or pagination control carries no `data-film-id`.
#[must_use]
pub fn resolve_click(target: &ClickTarget, page_film: Option<FilmId>) -> Option<UiAction> {
    let film = || {
        target
            .film_id
            .as_deref()
            .and_then(FilmId::parse)
            .or(page_film)
    };
    let review_page = || {
        let page = target
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)?;
        film().map(|film| UiAction::ReviewPage { film, page })
    };

    if let Some(action) = target.action.as_deref() {
        return match action {
            "like" => film().map(UiAction::ToggleLike),
            "review-page" => review_page(),
            "delete-interaction" => Some(UiAction::DeleteInteraction),
            "toggle-language" => Some(UiAction::ToggleLanguage),
            "toggle-accessibility" => Some(UiAction::TogglePanel),
            "close-accessibility" => Some(UiAction::ClosePanel),
            "speak-page" => Some(UiAction::ReadPage),
            "high-contrast" => Some(UiAction::ToggleHighContrast),
            "increase-font" => Some(UiAction::IncreaseFont),
            "decrease-font" => Some(UiAction::DecreaseFont),
            "screen-reader-mode" => Some(UiAction::ToggleScreenReader),
            "keyboard-help" => Some(UiAction::ShowShortcuts),
            "open-link" => target.link(),
            "toggle-nav" => Some(UiAction::ToggleNavMenu),
            "toggle-user-menu" => Some(UiAction::ToggleUserMenu),
            "back" => Some(target.back()),
            "clear-filters" => Some(UiAction::ClearFilters),
            other => {
                tracing::debug!(action = other, "unhandled data-action");
                None
            }
        };
    }

    if target.has_class("like-btn") || target.has_class("btn-like") {
        return film().map(UiAction::ToggleLike);
    }
    if target.has_class("review-page-btn") {
        return review_page();
    }
    if target.has_class("film-card") || target.has_class("feature-card") {
        return target.link();
    }
    if let Some(action) = legacy_hook(target) {
        return Some(action);
    }
    match target.id.as_deref() {
        Some("back-button") => Some(target.back()),
        _ => None,
    }
}

fn legacy_hook(target: &ClickTarget) -> Option<UiAction> {
    const BY_ID: [(&str, UiAction); 9] = [
        ("delete-interaction", UiAction::DeleteInteraction),
        ("lang-toggle", UiAction::ToggleLanguage),
        ("speak-page", UiAction::ReadPage),
        ("high-contrast", UiAction::ToggleHighContrast),
        ("increase-font", UiAction::IncreaseFont),
        ("decrease-font", UiAction::DecreaseFont),
        ("screen-reader-mode", UiAction::ToggleScreenReader),
        ("keyboard-nav", UiAction::ShowShortcuts),
        ("keyboard-help", UiAction::ShowShortcuts),
    ];
    const BY_CLASS: [(&str, UiAction); 5] = [
        ("accessibility-toggle", UiAction::TogglePanel),
        ("close-accessibility", UiAction::ClosePanel),
        ("mobile-menu-toggle", UiAction::ToggleNavMenu),
        ("user-menu-trigger", UiAction::ToggleUserMenu),
        ("clear-filters", UiAction::ClearFilters),
    ];
    BY_ID
        .iter()
        .find(|(id, _)| target.is(id))
        .or_else(|| BY_CLASS.iter().find(|(class, _)| target.has_class(class)))
        .map(|(_, action)| action.clone())
}

/// Enter or Space on a focused card follows its link.
#[must_use]
pub fn activate_card(key: &str, href: Option<&str>) -> Option<UiAction> {
    if !matches!(key, "Enter" | " ") {
        return None;
    }
    href.map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| UiAction::OpenLink(href.to_string()))
}

/// Dropdowns a click closes because it landed outside them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dismissal {
    /// Close the mobile navigation.
    pub nav_menu: bool,
    /// Close the user dropdown.
    pub user_menu: bool,
}

/// Which dropdowns a click closes. `action` is what the click resolved to and
/// `in_nav_menu` tells whether it landed inside the navigation itself.
#[must_use]
pub fn dismissal_for(action: Option<&UiAction>, in_nav_menu: bool) -> Dismissal {
    Dismissal {
        nav_menu: !in_nav_menu && !matches!(action, Some(UiAction::ToggleNavMenu)),
        user_menu: !matches!(action, Some(UiAction::ToggleUserMenu)),
    }
}

/// Outcome of a keyboard shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutOutcome {
    /// Go to a site path.
    Navigate(&'static str),
    /// Focus the search input.
    FocusSearch,
    /// Swallow the key without doing anything (retired theme toggle).
    Consumed,
    /// Toggle the page language.
    ToggleLanguage,
    /// Open or close the accessibility panel.
    TogglePanel,
    /// Close open menus.
    CloseMenus,
}

impl ShortcutOutcome {
    /// Whether the browser default for the key should be suppressed.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::CloseMenus)
    }
}

/// Map a key press to a shortcut. `editing` is true while focus is in an
/// input, textarea or editable element; every key is left alone then.
#[must_use]
pub fn interpret_shortcut(key: &str, alt: bool, editing: bool) -> Option<ShortcutOutcome> {
    if editing {
        return None;
    }
    if key == "Escape" {
        return Some(ShortcutOutcome::CloseMenus);
    }
    if !alt {
        return None;
    }
    match key.to_ascii_lowercase().as_str() {
        "h" => Some(ShortcutOutcome::Navigate("/")),
        "s" => Some(ShortcutOutcome::FocusSearch),
        "r" => Some(ShortcutOutcome::Navigate("/recommendations")),
        "p" => Some(ShortcutOutcome::Navigate("/profile")),
        "t" => Some(ShortcutOutcome::Consumed),
        "l" => Some(ShortcutOutcome::ToggleLanguage),
        "a" => Some(ShortcutOutcome::TogglePanel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_action(action: &str) -> ClickTarget {
        ClickTarget {
            action: Some(action.to_string()),
            ..ClickTarget::default()
        }
    }

    #[test]
    fn data_action_like_uses_attribute_film() {
        let target = ClickTarget {
            film_id: Some("42".into()),
            ..with_action("like")
        };
        let film = FilmId::new(42).expect("film");
        assert_eq!(resolve_click(&target, None), Some(UiAction::ToggleLike(film)));
    }

    #[test]
    fn legacy_like_class_falls_back_to_page_film() {
        let target = ClickTarget {
            classes: vec!["btn".into(), "btn-like".into()],
            ..ClickTarget::default()
        };
        let film = FilmId::new(7).expect("film");
        assert_eq!(
            resolve_click(&target, Some(film)),
            Some(UiAction::ToggleLike(film))
        );
        assert_eq!(resolve_click(&target, None), None);
    }

    #[test]
    fn review_page_requires_positive_page() {
        let film = FilmId::new(5).expect("film");
        let mut target = ClickTarget {
            classes: vec!["review-page-btn".into()],
            page: Some("3".into()),
            ..ClickTarget::default()
        };
        assert_eq!(
            resolve_click(&target, Some(film)),
            Some(UiAction::ReviewPage { film, page: 3 })
        );
        target.page = Some("0".into());
        assert_eq!(resolve_click(&target, Some(film)), None);
        target.page = Some("next".into());
        assert_eq!(resolve_click(&target, Some(film)), None);
    }

    #[test]
    fn review_page_prefers_the_bound_film() {
        let target = ClickTarget {
            film_id: Some("42".into()),
            page: Some("2".into()),
            ..with_action("review-page")
        };
        let film = FilmId::new(42).expect("film");
        assert_eq!(
            resolve_click(&target, None),
            Some(UiAction::ReviewPage { film, page: 2 })
        );
        let unbound = ClickTarget {
            film_id: None,
            ..target
        };
        assert_eq!(resolve_click(&unbound, None), None);
    }

    #[test]
    fn id_hooks_resolve() {
        let delete = ClickTarget {
            id: Some("delete-interaction".into()),
            ..ClickTarget::default()
        };
        assert_eq!(resolve_click(&delete, None), Some(UiAction::DeleteInteraction));
        let lang = ClickTarget {
            id: Some("lang-toggle".into()),
            ..ClickTarget::default()
        };
        assert_eq!(resolve_click(&lang, None), Some(UiAction::ToggleLanguage));
    }

    #[test]
    fn template_panel_buttons_resolve_by_id_and_class() {
        let by_id = |id: &str| ClickTarget {
            id: Some(id.into()),
            ..ClickTarget::default()
        };
        let by_class = |class: &str| ClickTarget {
            classes: vec![class.into()],
            ..ClickTarget::default()
        };
        assert_eq!(resolve_click(&by_id("speak-page"), None), Some(UiAction::ReadPage));
        assert_eq!(
            resolve_click(&by_id("high-contrast"), None),
            Some(UiAction::ToggleHighContrast)
        );
        assert_eq!(
            resolve_click(&by_id("decrease-font"), None),
            Some(UiAction::DecreaseFont)
        );
        assert_eq!(
            resolve_click(&by_id("screen-reader-mode"), None),
            Some(UiAction::ToggleScreenReader)
        );
        assert_eq!(
            resolve_click(&by_id("keyboard-nav"), None),
            Some(UiAction::ShowShortcuts)
        );
        assert_eq!(
            resolve_click(&by_class("accessibility-toggle"), None),
            Some(UiAction::TogglePanel)
        );
        assert_eq!(
            resolve_click(&by_class("close-accessibility"), None),
            Some(UiAction::ClosePanel)
        );
    }

    #[test]
    fn menus_back_and_filters_resolve() {
        let class = |class: &str| ClickTarget {
            classes: vec![class.into()],
            ..ClickTarget::default()
        };
        assert_eq!(
            resolve_click(&class("mobile-menu-toggle"), None),
            Some(UiAction::ToggleNavMenu)
        );
        assert_eq!(
            resolve_click(&class("user-menu-trigger"), None),
            Some(UiAction::ToggleUserMenu)
        );
        assert_eq!(
            resolve_click(&class("clear-filters"), None),
            Some(UiAction::ClearFilters)
        );
        let back = ClickTarget {
            id: Some("back-button".into()),
            ..ClickTarget::default()
        };
        assert_eq!(
            resolve_click(&back, None),
            Some(UiAction::GoBack {
                fallback: "/".into()
            })
        );
        let back_to_list = ClickTarget {
            default_url: Some("/films".into()),
            ..back
        };
        assert_eq!(
            resolve_click(&back_to_list, None),
            Some(UiAction::GoBack {
                fallback: "/films".into()
            })
        );
    }

    #[test]
    fn cards_follow_their_link_unless_a_nested_control_was_hit() {
        let card = ClickTarget {
            classes: vec!["film-card".into()],
            href: Some("/films/9".into()),
            ..ClickTarget::default()
        };
        assert_eq!(
            resolve_click(&card, None),
            Some(UiAction::OpenLink("/films/9".into()))
        );
        let nested = ClickTarget {
            inside_control: true,
            ..card.clone()
        };
        assert_eq!(resolve_click(&nested, None), None);
        let empty = ClickTarget {
            href: Some("  ".into()),
            ..card
        };
        assert_eq!(resolve_click(&empty, None), None);
    }

    #[test]
    fn card_keys_are_enter_and_space() {
        assert_eq!(
            activate_card("Enter", Some("/films/3")),
            Some(UiAction::OpenLink("/films/3".into()))
        );
        assert_eq!(
            activate_card(" ", Some("/about")),
            Some(UiAction::OpenLink("/about".into()))
        );
        assert_eq!(activate_card("a", Some("/films/3")), None);
        assert_eq!(activate_card("Enter", None), None);
    }

    #[test]
    fn clicks_elsewhere_dismiss_dropdowns() {
        assert_eq!(
            dismissal_for(None, false),
            Dismissal {
                nav_menu: true,
                user_menu: true
            }
        );
        assert_eq!(
            dismissal_for(Some(&UiAction::ToggleUserMenu), false),
            Dismissal {
                nav_menu: true,
                user_menu: false
            }
        );
        assert_eq!(
            dismissal_for(Some(&UiAction::ToggleNavMenu), false),
            Dismissal {
                nav_menu: false,
                user_menu: true
            }
        );
        assert!(!dismissal_for(None, true).nav_menu);
    }

    #[test]
    fn panel_actions_resolve() {
        assert_eq!(
            resolve_click(&with_action("increase-font"), None),
            Some(UiAction::IncreaseFont)
        );
        assert_eq!(
            resolve_click(&with_action("keyboard-help"), None),
            Some(UiAction::ShowShortcuts)
        );
        assert_eq!(resolve_click(&with_action("unknown"), None), None);
    }

    #[test]
    fn shortcuts_cover_alt_keys() {
        assert_eq!(
            interpret_shortcut("h", true, false),
            Some(ShortcutOutcome::Navigate("/"))
        );
        assert_eq!(
            interpret_shortcut("R", true, false),
            Some(ShortcutOutcome::Navigate("/recommendations"))
        );
        assert_eq!(
            interpret_shortcut("s", true, false),
            Some(ShortcutOutcome::FocusSearch)
        );
        assert_eq!(
            interpret_shortcut("t", true, false),
            Some(ShortcutOutcome::Consumed)
        );
        assert_eq!(
            interpret_shortcut("l", true, false),
            Some(ShortcutOutcome::ToggleLanguage)
        );
        assert_eq!(interpret_shortcut("h", false, false), None);
        assert_eq!(interpret_shortcut("x", true, false), None);
    }

    #[test]
    fn escape_closes_menus_without_preventing_default() {
        let outcome = interpret_shortcut("Escape", false, false).expect("escape");
        assert_eq!(outcome, ShortcutOutcome::CloseMenus);
        assert!(!outcome.prevents_default());
    }

    #[test]
    fn editing_suppresses_all_shortcuts() {
        assert_eq!(interpret_shortcut("h", true, true), None);
        assert_eq!(interpret_shortcut("Escape", false, true), None);
    }
}
