//! Review list pagination.

use crate::core::film::FilmId;
use std::fmt::Write;

/// Number of pages for `total` items, never less than one.
#[must_use]
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let pages = total.div_ceil(u64::from(per_page.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// One rendered pagination element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    /// Button to the previous page.
    Previous {
        /// Page the button loads.
        target: u32,
    },
    /// `Page c / t` indicator.
    Indicator {
        /// Current page.
        current: u32,
        /// Total pages.
        total: u32,
    },
    /// Button to the next page.
    Next {
        /// Page the button loads.
        target: u32,
    },
}

/// Pagination controls for the review list.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Pagination {
    controls: Vec<PageControl>,
    film: Option<FilmId>,
}

impl Pagination {
    /// Bind the buttons to `film`, so they work on pages whose path does not
    /// name it.
    #[must_use]
    pub const fn for_film(mut self, film: FilmId) -> Self {
        self.film = Some(film);
        self
    }

    /// Controls in display order.
    #[must_use]
    pub fn controls(&self) -> &[PageControl] {
        &self.controls
    }

    /// True when a single page needs no controls at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Whether a "Previous" button is present.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.controls
            .iter()
            .any(|control| matches!(control, PageControl::Previous { .. }))
    }

    /// Whether a "Next" button is present.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.controls
            .iter()
            .any(|control| matches!(control, PageControl::Next { .. }))
    }

    /// Markup for the pagination container.
    ///
    /// Buttons carry `data-action="review-page"` so a single delegated
    /// listener handles them across re-renders.
    #[must_use]
    pub fn to_html(&self) -> String {
        let film_attr = self
            .film
            .map(|film| format!(r#" data-film-id="{film}""#))
            .unwrap_or_default();
        let mut html = String::new();
        for control in &self.controls {
            let _ = match control {
                PageControl::Previous { target } => write!(
                    html,
                    r#"<button type="button" class="review-page-btn" data-action="review-page" data-page="{target}"{film_attr}>Previous</button>"#
                ),
                PageControl::Indicator { current, total } => {
                    write!(html, "<span> Page {current} / {total} </span>")
                }
                PageControl::Next { target } => write!(
                    html,
                    r#"<button type="button" class="review-page-btn" data-action="review-page" data-page="{target}"{film_attr}>Next</button>"#
                ),
            };
        }
        html
    }
}

/// Build the controls for `current` out of `total_pages`.
#[must_use]
pub fn render_reviews_pagination(current: u32, total_pages: u32) -> Pagination {
    if total_pages <= 1 {
        return Pagination::default();
    }
    let mut controls = Vec::with_capacity(3);
    if current > 1 {
        controls.push(PageControl::Previous {
            target: current - 1,
        });
    }
    controls.push(PageControl::Indicator {
        current,
        total: total_pages,
    });
    if current < total_pages {
        controls.push(PageControl::Next {
            target: current + 1,
        });
    }
    Pagination {
        controls,
        film: None,
    }
}
