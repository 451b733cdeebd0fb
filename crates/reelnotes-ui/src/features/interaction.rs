//! Rating/review form: draft gating, save with optimistic echo, delete.

use crate::core::display::{FilmStatsView, OwnInteractionView};
use crate::core::draft::{DraftFields, ReviewDraft, draft_status};
use crate::core::feed::{EntryOrigin, ReviewEntry};
use crate::core::film::FilmId;
use crate::core::prefs::KeyValueStore;
use crate::features::{FollowUp, PageController, RECONCILE_DELAY, RELOAD_DELAY};
use crate::services::http::Transport;
use crate::surface::{BusyGuard, Notice, PageSurface};
use chrono::Utc;

/// Submit label while saving.
pub const SAVING_LABEL: &str = "Saving...";
/// Submit label at rest.
pub const SAVE_LABEL: &str = "Save Review";
/// Delete label while deleting.
pub const DELETING_LABEL: &str = "Deleting...";
/// Delete label at rest.
pub const DELETE_LABEL: &str = "Delete Review";
/// Confirmation asked before deleting.
pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this review? This action cannot be undone.";

impl<T, P, S> PageController<T, P, S>
where
    T: Transport,
    P: PageSurface,
    S: KeyValueStore,
{
    /// Refresh the character counter and submit enablement.
    pub fn update_draft(&self, fields: &DraftFields) {
        let status = draft_status(fields);
        self.surface.set_char_counter(&status.counter);
        self.surface.set_submit_enabled(status.submit_enabled);
    }

    /// Save the form. Returns the reconcile follow-up on success.
    pub async fn submit_interaction(
        &self,
        film: FilmId,
        fields: &DraftFields,
        control: &P::Control,
    ) -> Option<FollowUp> {
        let draft = match ReviewDraft::from_fields(fields) {
            Ok(draft) => draft,
            Err(err) => {
                self.surface.notify(&Notice::error(err.to_string()));
                return None;
            }
        };
        if !draft.has_content() {
            self.surface.set_submit_enabled(false);
            return None;
        }

        let response = {
            let _busy = BusyGuard::new(&self.surface, control, Some(SAVING_LABEL), Some(SAVE_LABEL));
            let origin = self.surface.location();
            self.client
                .save_interaction(film, &draft.to_request(), &origin)
                .await
        };
        let resp = match response {
            Ok(resp) => resp,
            Err(err) => {
                self.report(&err, "Save failed");
                return None;
            }
        };

        tracing::debug!(film_id = film.get(), "interaction saved");
        self.surface
            .notify(&Notice::success(resp.message.clone().unwrap_or_default()));
        if let Some(data) = &resp.data {
            self.surface
                .show_own_interaction(&OwnInteractionView::from(data));
            if let Some(stats) = &data.film_stats {
                self.surface.show_film_stats(&FilmStatsView::from(stats));
            }
        }

        if !draft.review().is_empty() {
            let username = self
                .surface
                .current_username()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.config.anonymous_label.clone());
            let entry = match resp.data.as_ref().and_then(|data| data.confirmed_review()) {
                Some(review) => ReviewEntry::from_dto(review, EntryOrigin::Confirmed, &username),
                None => ReviewEntry::placeholder(&username, &draft, Utc::now()),
            };
            let html = {
                let mut state = self.state.borrow_mut();
                state.feed.echo(entry);
                state.feed.render_list()
            };
            self.surface.replace_reviews(&html);
        }

        Some(FollowUp::ReconcileReviews {
            film,
            after: RECONCILE_DELAY,
        })
    }

    /// Delete the user's interaction after confirmation. Returns the page
    /// reload follow-up on success.
    pub async fn delete_interaction(&self, film: FilmId, control: &P::Control) -> Option<FollowUp> {
        if !self.surface.confirm(DELETE_CONFIRMATION) {
            return None;
        }
        let response = {
            let _busy = BusyGuard::new(
                &self.surface,
                control,
                Some(DELETING_LABEL),
                Some(DELETE_LABEL),
            );
            let origin = self.surface.location();
            self.client.delete_interaction(film, &origin).await
        };
        match response {
            Ok(resp) => {
                tracing::debug!(film_id = film.get(), "interaction deleted");
                self.surface
                    .notify(&Notice::success(resp.message.unwrap_or_default()));
                Some(FollowUp::ReloadPage {
                    after: RELOAD_DELAY,
                })
            }
            Err(err) => {
                self.report(&err, "Delete failed");
                None
            }
        }
    }
}
