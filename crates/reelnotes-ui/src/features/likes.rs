//! Like toggling.

use crate::core::film::FilmId;
use crate::core::prefs::KeyValueStore;
use crate::error::ApiError;
use crate::features::PageController;
use crate::services::http::Transport;
use crate::surface::{BusyGuard, Notice, PageSurface};

/// Message shown when the server confirms a toggle without one.
pub const LIKE_UPDATED: &str = "Like updated";

impl<T, P, S> PageController<T, P, S>
where
    T: Transport,
    P: PageSurface,
    S: KeyValueStore,
{
    /// Toggle the like on `film`, clicked through `control`.
    ///
    /// The page is updated only from the server's answer. Concurrent toggles
    /// are not fenced; the last response to arrive wins.
    pub async fn toggle_like(&self, film: FilmId, control: &P::Control) {
        let _busy = BusyGuard::new(&self.surface, control, None, None);
        let origin = self.surface.location();
        match self.client.toggle_like(film, &origin).await {
            Ok(resp) => {
                tracing::debug!(film_id = film.get(), liked = resp.liked, "like toggled");
                self.surface.set_like_state(film, control, resp.liked);
                self.surface.set_like_count(film, resp.like_count);
                let message = resp
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| LIKE_UPDATED.to_string());
                self.surface.notify(&Notice::success(message));
            }
            Err(err) => {
                let generic = match &err {
                    ApiError::Rejected { status, .. } => format!("Operation failed ({status})"),
                    _ => String::new(),
                };
                self.report(&err, &generic);
            }
        }
    }
}
