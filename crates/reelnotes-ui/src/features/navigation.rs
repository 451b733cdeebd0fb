//! Site chrome: dropdown menus, the back button and the filter reset.

use crate::core::actions::{Dismissal, FILMS_PATH};
use crate::core::prefs::KeyValueStore;
use crate::features::{BACK_FALLBACK_DELAY, FollowUp, PageController};
use crate::services::http::Transport;
use crate::state::PendingBack;
use crate::surface::PageSurface;

impl<T, P, S> PageController<T, P, S>
where
    T: Transport,
    P: PageSurface,
    S: KeyValueStore,
{
    /// Open or close the mobile navigation.
    pub fn toggle_nav_menu(&self) {
        let open = {
            let mut state = self.state.borrow_mut();
            state.nav_menu_open = !state.nav_menu_open;
            state.nav_menu_open
        };
        self.surface.set_nav_menu_open(open);
    }

    /// Open or close the user dropdown.
    pub fn toggle_user_menu(&self) {
        let open = {
            let mut state = self.state.borrow_mut();
            state.user_menu_open = !state.user_menu_open;
            state.user_menu_open
        };
        self.surface.set_user_menu_open(open);
    }

    /// Close the dropdowns a click outside of them dismissed.
    pub fn dismiss_menus(&self, dismissal: Dismissal) {
        let (nav, user) = {
            let mut state = self.state.borrow_mut();
            let nav = dismissal.nav_menu && state.nav_menu_open;
            let user = dismissal.user_menu && state.user_menu_open;
            state.nav_menu_open &= !nav;
            state.user_menu_open &= !user;
            (nav, user)
        };
        if nav {
            self.surface.set_nav_menu_open(false);
        }
        if user {
            self.surface.set_user_menu_open(false);
        }
    }

    /// Go back one page.
    ///
    /// Without history the browser goes straight to `fallback`. Otherwise the
    /// returned follow-up checks that the page actually changed.
    pub fn go_back(&self, fallback: String) -> Option<FollowUp> {
        let from = self.surface.location().path;
        if !self.surface.history_back() {
            self.surface.navigate(&fallback);
            return None;
        }
        self.state.borrow_mut().pending_back = Some(PendingBack { from, fallback });
        Some(FollowUp::ConfirmBack {
            after: BACK_FALLBACK_DELAY,
        })
    }

    pub(crate) fn confirm_back(&self) {
        let Some(pending) = self.state.borrow_mut().pending_back.take() else {
            return;
        };
        if self.surface.location().path == pending.from {
            tracing::debug!(fallback = %pending.fallback, "history did not move");
            self.surface.navigate(&pending.fallback);
        }
    }

    /// Show the unfiltered film list.
    pub fn clear_filters(&self) {
        self.surface.navigate(FILMS_PATH);
    }
}
