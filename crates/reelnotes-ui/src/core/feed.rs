//! Review list state with optimistic echo and load fencing.
//!
//! # Design
//! - The list is always re-rendered in full from [`ReviewFeed::entries`].
//! - An optimistic entry moves the feed through
//!   `Idle -> PendingLocal | Confirmed -> Reconciled`.
//! - Every load takes a monotonically increasing ticket. A page is applied
//!   only if its ticket is newer than the last applied one; an echo
//!   invalidates every ticket issued before it, so only a load started after
//!   the echo can replace the list. Whatever order responses arrive in, the
//!   list ends up showing the newest load that was started.

use crate::core::draft::ReviewDraft;
use crate::core::film::Rating;
use crate::core::html::escape_html;
use crate::core::pagination::{Pagination, render_reviews_pagination, total_pages};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use reelnotes_api_models::ReviewDto;
use std::fmt::Write;
use uuid::Uuid;

/// Where a displayed entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Part of a page fetched from the server.
    Server,
    /// Built locally from the submitted draft.
    Pending,
    /// Echo of the review object returned by the save call.
    Confirmed,
}

/// A review as displayed in the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewEntry {
    /// Client key for optimistic entries.
    pub key: Option<Uuid>,
    /// Author display name.
    pub username: String,
    /// Optional star rating.
    pub rating: Option<Rating>,
    /// Raw creation timestamp.
    pub created_at: Option<String>,
    /// Review body.
    pub text: String,
    /// Provenance of the entry.
    pub origin: EntryOrigin,
}

impl ReviewEntry {
    /// Convert a server review, using `fallback_username` for anonymous rows.
    #[must_use]
    pub fn from_dto(dto: &ReviewDto, origin: EntryOrigin, fallback_username: &str) -> Self {
        let key = match origin {
            EntryOrigin::Server => None,
            EntryOrigin::Pending | EntryOrigin::Confirmed => Some(Uuid::new_v4()),
        };
        Self {
            key,
            username: dto
                .user
                .as_ref()
                .and_then(|user| user.username())
                .unwrap_or(fallback_username)
                .to_string(),
            rating: dto.rating.and_then(Rating::new),
            created_at: dto.created_at.clone(),
            text: dto.review_text.clone().unwrap_or_default(),
            origin,
        }
    }

    /// Local stand-in for a review the server has not returned yet.
    #[must_use]
    pub fn placeholder(username: &str, draft: &ReviewDraft, now: DateTime<Utc>) -> Self {
        Self {
            key: Some(Uuid::new_v4()),
            username: username.to_string(),
            rating: draft.rating(),
            created_at: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
            text: draft.review().to_string(),
            origin: EntryOrigin::Pending,
        }
    }

    /// Markup for one `.review-item`.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let class = if self.origin == EntryOrigin::Server {
            "review-item"
        } else {
            "review-item review-new"
        };
        let _ = write!(html, r#"<div class="{class}""#);
        if let Some(key) = self.key {
            let _ = write!(html, r#" data-review-key="{key}""#);
        }
        let _ = write!(
            html,
            r#"><div class="review-header"><strong>{}</strong>"#,
            escape_html(&self.username)
        );
        if let Some(rating) = self.rating {
            let _ = write!(html, r#"<span class="review-rating">{rating}/5 ★</span>"#);
        }
        let date = self
            .created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default();
        let _ = write!(
            html,
            r#"<span class="review-date">{}</span></div><div class="review-content"><p>{}</p></div></div>"#,
            escape_html(&date),
            escape_html(&self.text)
        );
        html
    }
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`; unknown formats pass through.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M";
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(DISPLAY).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Optimistic echo lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EchoPhase {
    /// No optimistic entry since the feed was created.
    Idle,
    /// A locally built placeholder is showing.
    PendingLocal {
        /// Key of the placeholder entry.
        key: Uuid,
    },
    /// The server's own review object is showing ahead of a reload.
    Confirmed {
        /// Key of the echoed entry.
        key: Uuid,
    },
    /// A page loaded after the echo replaced the list.
    Reconciled,
}

/// Handle for one in-flight page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    page: u32,
}

impl LoadTicket {
    /// Page requested by this load.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }
}

/// Review list state for one film page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewFeed {
    per_page: u32,
    page: u32,
    total_pages: u32,
    entries: Vec<ReviewEntry>,
    phase: EchoPhase,
    issued: u64,
    applied: u64,
}

impl ReviewFeed {
    /// Empty feed with the given page size.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
            page: 1,
            total_pages: 1,
            entries: Vec::new(),
            phase: EchoPhase::Idle,
            issued: 0,
            applied: 0,
        }
    }

    /// Page size used for requests.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Page currently displayed.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total pages reported by the last applied load.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    /// Current echo phase.
    #[must_use]
    pub const fn phase(&self) -> EchoPhase {
        self.phase
    }

    /// Start a load for `page`.
    pub fn begin_load(&mut self, page: u32) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            seq: self.issued,
            page: page.max(1),
        }
    }

    /// Apply a fetched page. Returns `false` when the ticket is stale and the
    /// page was discarded.
    pub fn apply_page(&mut self, ticket: LoadTicket, entries: Vec<ReviewEntry>, total: u64) -> bool {
        if ticket.seq <= self.applied {
            return false;
        }
        self.applied = ticket.seq;
        self.entries = entries;
        self.total_pages = total_pages(total, self.per_page);
        self.page = ticket.page;
        if matches!(
            self.phase,
            EchoPhase::PendingLocal { .. } | EchoPhase::Confirmed { .. }
        ) {
            self.phase = EchoPhase::Reconciled;
        }
        true
    }

    /// Prepend an optimistic entry, replacing any entry by the same author.
    ///
    /// Loads started before this call can no longer be applied.
    pub fn echo(&mut self, mut entry: ReviewEntry) {
        let key = *entry.key.get_or_insert_with(Uuid::new_v4);
        self.phase = match entry.origin {
            EntryOrigin::Confirmed => EchoPhase::Confirmed { key },
            EntryOrigin::Pending | EntryOrigin::Server => {
                entry.origin = EntryOrigin::Pending;
                EchoPhase::PendingLocal { key }
            }
        };
        self.applied = self.issued;
        self.entries.retain(|existing| existing.username != entry.username);
        self.entries.insert(0, entry);
    }

    /// Markup for the whole list container.
    #[must_use]
    pub fn render_list(&self) -> String {
        self.entries.iter().map(ReviewEntry::to_html).collect()
    }

    /// Pagination controls for the current page.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        render_reviews_pagination(self.page, self.total_pages)
    }
}
