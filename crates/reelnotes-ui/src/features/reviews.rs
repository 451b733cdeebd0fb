//! Paginated review list.

use crate::core::feed::{EntryOrigin, ReviewEntry};
use crate::core::film::FilmId;
use crate::core::prefs::KeyValueStore;
use crate::features::PageController;
use crate::services::http::Transport;
use crate::surface::PageSurface;

impl<T, P, S> PageController<T, P, S>
where
    T: Transport,
    P: PageSurface,
    S: KeyValueStore,
{
    /// Load `page` of the film's reviews and re-render the list.
    ///
    /// Returns `true` when the page was applied. A load that was overtaken by
    /// a newer load or by an optimistic echo is discarded; failures leave the
    /// list as it was.
    pub async fn load_reviews(&self, film: FilmId, page: u32) -> bool {
        let (ticket, per_page) = {
            let mut state = self.state.borrow_mut();
            let ticket = state.feed.begin_load(page);
            (ticket, state.feed.per_page())
        };
        let origin = self.surface.location();
        let resp = match self
            .client
            .fetch_reviews(film, ticket.page(), per_page, &origin)
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(film_id = film.get(), page, error = %err, "failed to load reviews");
                return false;
            }
        };

        let fallback = self.config.anonymous_label.clone();
        let entries = resp
            .data
            .iter()
            .map(|dto| ReviewEntry::from_dto(dto, EntryOrigin::Server, &fallback))
            .collect();
        let rendered = {
            let mut state = self.state.borrow_mut();
            if state.feed.apply_page(ticket, entries, resp.total) {
                Some((
                    state.feed.render_list(),
                    state.feed.pagination().for_film(film).to_html(),
                ))
            } else {
                None
            }
        };
        match rendered {
            Some((list, pagination)) => {
                self.surface.replace_reviews(&list);
                self.surface.replace_pagination(&pagination);
                true
            }
            None => {
                tracing::debug!(film_id = film.get(), page, "discarded stale review page");
                false
            }
        }
    }
}
