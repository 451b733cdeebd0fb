//! Page controllers.
//!
//! # Design
//! - [`PageController`] owns the API client, the page surface, preference
//!   storage and the page state; each feature module adds one `impl` block.
//! - Controllers never sleep. Delayed work is returned as a [`FollowUp`] and
//!   scheduled by the caller, so tests can run it immediately.
//! - State is borrowed only between await points.

pub mod interaction;
pub mod likes;
pub mod navigation;
pub mod preferences;
pub mod reviews;

use crate::config::UiConfig;
use crate::core::actions::UiAction;
use crate::core::film::FilmId;
use crate::core::prefs::{FONT_SCALE_STEP, KeyValueStore, PreferenceStore, Preferences};
use crate::error::ApiError;
use crate::services::http::{ApiClient, Transport};
use crate::state::PageState;
use crate::surface::{Notice, PageSurface};
use std::cell::RefCell;
use std::time::Duration;

/// Delay before the review list is reconciled with the server after a save.
pub const RECONCILE_DELAY: Duration = Duration::from_millis(800);
/// Delay before the page reloads after a delete.
pub const RELOAD_DELAY: Duration = Duration::from_millis(1000);
/// Delay before a back navigation that went nowhere falls back.
pub const BACK_FALLBACK_DELAY: Duration = Duration::from_millis(300);

/// Work to run after an operation has finished, once `after` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Replace the review list with the server's first page.
    ReconcileReviews {
        /// Film whose reviews are reloaded.
        film: FilmId,
        /// Delay before reloading.
        after: Duration,
    },
    /// Reload the whole page.
    ReloadPage {
        /// Delay before reloading.
        after: Duration,
    },
    /// Leave for the back button's fallback if history did not move.
    ConfirmBack {
        /// Delay before checking.
        after: Duration,
    },
}

impl FollowUp {
    /// How long to wait before running the follow-up.
    #[must_use]
    pub const fn delay(self) -> Duration {
        match self {
            Self::ReconcileReviews { after, .. }
            | Self::ReloadPage { after }
            | Self::ConfirmBack { after } => after,
        }
    }
}

/// Controller for one server-rendered page.
pub struct PageController<T, P, S> {
    client: ApiClient<T>,
    surface: P,
    store: PreferenceStore<S>,
    config: UiConfig,
    state: RefCell<PageState>,
}

impl<T, P, S> PageController<T, P, S>
where
    T: Transport,
    P: PageSurface,
    S: KeyValueStore,
{
    /// Assemble a controller. Preferences are read by [`Self::boot`].
    pub fn new(
        client: ApiClient<T>,
        surface: P,
        store: PreferenceStore<S>,
        config: UiConfig,
    ) -> Self {
        let state = PageState::new(config.reviews_per_page, Preferences::default());
        Self {
            client,
            surface,
            store,
            config,
            state: RefCell::new(state),
        }
    }

    /// Page surface.
    pub const fn surface(&self) -> &P {
        &self.surface
    }

    /// API client.
    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Preference storage.
    pub const fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    /// Active configuration.
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Snapshot of the page state.
    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    /// Film the current page is about: its path, or the film the review form
    /// or list is bound to.
    pub fn page_film(&self) -> Option<FilmId> {
        FilmId::from_path(&self.surface.location().path).or_else(|| self.surface.bound_film())
    }

    /// Route a resolved click to its controller. `control` is the element
    /// that was clicked.
    pub async fn dispatch(&self, action: UiAction, control: &P::Control) -> Option<FollowUp> {
        tracing::debug!(?action, "dispatch");
        match action {
            UiAction::ToggleLike(film) => {
                self.toggle_like(film, control).await;
                None
            }
            UiAction::ReviewPage { film, page } => {
                self.load_reviews(film, page).await;
                None
            }
            UiAction::DeleteInteraction => match self.page_film() {
                Some(film) => self.delete_interaction(film, control).await,
                None => {
                    self.surface.notify(&Notice::error("Unable to get film ID"));
                    None
                }
            },
            UiAction::ToggleLanguage => Some(self.toggle_language().await),
            UiAction::TogglePanel => {
                self.toggle_panel();
                None
            }
            UiAction::ClosePanel => {
                self.close_panel();
                None
            }
            UiAction::ReadPage => {
                self.read_page();
                None
            }
            UiAction::ToggleHighContrast => {
                self.toggle_high_contrast();
                None
            }
            UiAction::IncreaseFont => {
                self.adjust_font(FONT_SCALE_STEP);
                None
            }
            UiAction::DecreaseFont => {
                self.adjust_font(-FONT_SCALE_STEP);
                None
            }
            UiAction::ToggleScreenReader => {
                self.toggle_screen_reader();
                None
            }
            UiAction::ShowShortcuts => {
                self.show_shortcuts();
                None
            }
            UiAction::OpenLink(href) => {
                self.surface.navigate(&href);
                None
            }
            UiAction::ToggleNavMenu => {
                self.toggle_nav_menu();
                None
            }
            UiAction::ToggleUserMenu => {
                self.toggle_user_menu();
                None
            }
            UiAction::GoBack { fallback } => self.go_back(fallback),
            UiAction::ClearFilters => {
                self.clear_filters();
                None
            }
        }
    }

    /// Carry out a follow-up whose delay has elapsed.
    pub async fn run_follow_up(&self, follow_up: FollowUp) {
        match follow_up {
            FollowUp::ReconcileReviews { film, .. } => {
                self.load_reviews(film, 1).await;
            }
            FollowUp::ReloadPage { .. } => self.surface.reload(),
            FollowUp::ConfirmBack { .. } => self.confirm_back(),
        }
    }

    /// Show a failed call to the user. Auth failures navigate instead.
    fn report(&self, err: &ApiError, generic: &str) {
        match err {
            ApiError::AuthRequired { redirect_to } => self.surface.navigate(redirect_to),
            other => self.surface.notify(&Notice::error(other.user_message(generic))),
        }
    }
}
