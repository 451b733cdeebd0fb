//! Language toggle, accessibility panel and keyboard shortcuts.

use crate::core::a11y::{
    font_announcement, high_contrast_announcement, readable_text, screen_reader_announcement,
    shortcut_help_text,
};
use crate::core::actions::ShortcutOutcome;
use crate::core::prefs::{AccessibilityPrefs, KeyValueStore};
use crate::features::{FollowUp, PageController};
use crate::services::http::Transport;
use crate::surface::PageSurface;
use std::time::Duration;

impl<T, P, S> PageController<T, P, S>
where
    T: Transport,
    P: PageSurface,
    S: KeyValueStore,
{
    /// Load stored preferences and apply them to the page.
    pub fn boot(&self) {
        let preferences = self.store.load();
        self.state.borrow_mut().preferences = preferences;
        self.surface.apply_language(preferences.language);
        self.surface.apply_accessibility(&preferences.accessibility);
        tracing::debug!(lang = preferences.language.code(), "preferences applied");
    }

    /// Switch between English and Chinese, tell the server, and ask for a reload.
    ///
    /// The reload happens whether or not the server call succeeded.
    pub async fn toggle_language(&self) -> FollowUp {
        let next = {
            let mut state = self.state.borrow_mut();
            state.preferences.language = state.preferences.language.toggled();
            state.preferences.language
        };
        self.surface.apply_language(next);
        if let Err(err) = self.store.save_language(next) {
            tracing::warn!(error = %err, "failed to persist language");
        }
        if let Err(err) = self.client.set_language(next).await {
            tracing::warn!(lang = next.code(), error = %err, "language switch request failed");
        }
        FollowUp::ReloadPage {
            after: Duration::ZERO,
        }
    }

    /// Open or close the accessibility panel.
    pub fn toggle_panel(&self) {
        let open = {
            let mut state = self.state.borrow_mut();
            state.panel_open = !state.panel_open;
            state.panel_open
        };
        self.surface.set_panel_open(open);
    }

    /// Close the accessibility panel.
    pub fn close_panel(&self) {
        self.state.borrow_mut().panel_open = false;
        self.surface.set_panel_open(false);
    }

    /// Toggle high contrast.
    pub fn toggle_high_contrast(&self) {
        let enabled = self.update_accessibility(|prefs| {
            prefs.high_contrast = !prefs.high_contrast;
            prefs.high_contrast
        });
        self.surface.announce(high_contrast_announcement(enabled));
    }

    /// Grow or shrink the font scale by `delta`.
    pub fn adjust_font(&self, delta: f64) {
        let percent = self.update_accessibility(|prefs| {
            prefs.adjust_font(delta);
            prefs.font_percent()
        });
        self.surface.announce(&font_announcement(percent));
    }

    /// Toggle screen-reader friendly mode.
    pub fn toggle_screen_reader(&self) {
        let enabled = self.update_accessibility(|prefs| {
            prefs.screen_reader_mode = !prefs.screen_reader_mode;
            prefs.screen_reader_mode
        });
        self.surface.announce(screen_reader_announcement(enabled));
    }

    /// Read the main content aloud.
    pub fn read_page(&self) {
        let text = readable_text(&self.surface.readable_nodes());
        if text.trim().is_empty() {
            self.surface.announce("No readable content found on this page");
            return;
        }
        let language = self.state.borrow().preferences.language;
        if self.surface.speak(&text, language) {
            self.surface.announce("Reading page content...");
        } else {
            self.surface
                .announce("Speech synthesis not supported in this browser");
        }
    }

    /// Show the keyboard shortcut help.
    pub fn show_shortcuts(&self) {
        self.surface.alert(shortcut_help_text());
        self.surface.announce("Keyboard shortcuts displayed");
    }

    /// Carry out a keyboard shortcut.
    pub async fn handle_shortcut(&self, outcome: ShortcutOutcome) -> Option<FollowUp> {
        match outcome {
            ShortcutOutcome::Navigate(path) => self.surface.navigate(path),
            ShortcutOutcome::FocusSearch => self.surface.focus_search(),
            ShortcutOutcome::Consumed => {}
            ShortcutOutcome::ToggleLanguage => return Some(self.toggle_language().await),
            ShortcutOutcome::TogglePanel => self.toggle_panel(),
            ShortcutOutcome::CloseMenus => {
                self.state.borrow_mut().panel_open = false;
                self.surface.close_menus();
            }
        }
        None
    }

    fn update_accessibility<R>(&self, change: impl FnOnce(&mut AccessibilityPrefs) -> R) -> R {
        let (result, prefs) = {
            let mut state = self.state.borrow_mut();
            let result = change(&mut state.preferences.accessibility);
            (result, state.preferences.accessibility)
        };
        self.surface.apply_accessibility(&prefs);
        if let Err(err) = self.store.save_accessibility(&prefs) {
            tracing::warn!(error = %err, "failed to persist accessibility preferences");
        }
        result
    }
}
