//! In-memory fakes for the transport, the page surface and preference storage.

use async_trait::async_trait;
use reelnotes_ui::StorageError;
use reelnotes_ui::core::a11y::ReadableNode;
use reelnotes_ui::core::display::{FilmStatsView, OwnInteractionView};
use reelnotes_ui::core::film::FilmId;
use reelnotes_ui::core::location::PageLocation;
use reelnotes_ui::core::prefs::{AccessibilityPrefs, KeyValueStore};
use reelnotes_ui::i18n::LocaleCode;
use reelnotes_ui::services::http::{ApiRequest, RawResponse, Transport, TransportError};
use reelnotes_ui::surface::{Notice, PageSurface};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

type Reply = Result<RawResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// Holds back one scripted response until released.
pub struct Gate {
    sender: oneshot::Sender<Reply>,
}

impl Gate {
    /// Deliver `response` to the waiting request.
    pub fn open(self, response: RawResponse) {
        let _ = self.sender.send(Ok(response));
    }

    /// Fail the waiting request.
    pub fn fail(self, error: TransportError) {
        let _ = self.sender.send(Err(error));
    }
}

/// Transport answering requests from a FIFO script and recording what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Empty script; every request fails until responses are queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn respond(&self, response: RawResponse) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(response)));
    }

    /// Queue a transport failure.
    pub fn fail(&self, detail: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Err(TransportError::new(detail))));
    }

    /// Queue a response that is delivered only when the returned gate opens.
    #[must_use]
    pub fn gate(&self) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.script
            .borrow_mut()
            .push_back(Scripted::Gated(receiver));
        Gate { sender }
    }

    /// Requests sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// Number of scripted responses not consumed yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.script.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(TransportError::new("gate dropped"))),
            None => Err(TransportError::new("no scripted response")),
        }
    }
}

/// A busy/release call on a control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusyEvent {
    /// Control name.
    pub control: String,
    /// `true` for `set_busy`, `false` for `release`.
    pub busy: bool,
    /// Label passed along, if any.
    pub label: Option<String>,
}

/// Page surface that records every effect.
///
/// Controls are plain strings naming the element.
pub struct RecordingSurface {
    location: RefCell<PageLocation>,
    bound_film: Option<FilmId>,
    history: RefCell<Vec<String>>,
    history_moves: bool,
    username: Option<String>,
    confirm_answer: bool,
    readable: Vec<ReadableNode>,
    speech_supported: bool,

    notices: RefCell<Vec<Notice>>,
    navigations: RefCell<Vec<String>>,
    reloads: Cell<usize>,
    confirmations: RefCell<Vec<String>>,
    busy: RefCell<Vec<BusyEvent>>,
    like_states: RefCell<Vec<(FilmId, bool)>>,
    control_likes: RefCell<Vec<(String, bool)>>,
    like_counts: RefCell<Vec<(FilmId, u64)>>,
    own_views: RefCell<Vec<OwnInteractionView>>,
    stats_views: RefCell<Vec<FilmStatsView>>,
    reviews_html: RefCell<Vec<String>>,
    pagination_html: RefCell<Vec<String>>,
    submit_enabled: RefCell<Vec<bool>>,
    counters: RefCell<Vec<String>>,
    languages: RefCell<Vec<LocaleCode>>,
    accessibility: RefCell<Vec<AccessibilityPrefs>>,
    panel: RefCell<Vec<bool>>,
    announcements: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
    spoken: RefCell<Vec<(String, LocaleCode)>>,
    search_focused: Cell<usize>,
    menus_closed: Cell<usize>,
    nav_menu: RefCell<Vec<bool>>,
    user_menu: RefCell<Vec<bool>>,
    back_steps: Cell<usize>,
}

impl RecordingSurface {
    /// Surface for a page at `path`.
    #[must_use]
    pub fn on_page(path: &str) -> Self {
        Self {
            location: RefCell::new(PageLocation::new(path, "")),
            bound_film: None,
            history: RefCell::default(),
            history_moves: true,
            username: None,
            confirm_answer: true,
            readable: Vec::new(),
            speech_supported: true,
            notices: RefCell::default(),
            navigations: RefCell::default(),
            reloads: Cell::new(0),
            confirmations: RefCell::default(),
            busy: RefCell::default(),
            like_states: RefCell::default(),
            control_likes: RefCell::default(),
            like_counts: RefCell::default(),
            own_views: RefCell::default(),
            stats_views: RefCell::default(),
            reviews_html: RefCell::default(),
            pagination_html: RefCell::default(),
            submit_enabled: RefCell::default(),
            counters: RefCell::default(),
            languages: RefCell::default(),
            accessibility: RefCell::default(),
            panel: RefCell::default(),
            announcements: RefCell::default(),
            alerts: RefCell::default(),
            spoken: RefCell::default(),
            search_focused: Cell::new(0),
            menus_closed: Cell::new(0),
            nav_menu: RefCell::default(),
            user_menu: RefCell::default(),
            back_steps: Cell::new(0),
        }
    }

    /// Set the query string of the page.
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        self.location.get_mut().query = query.to_string();
        self
    }

    /// Bind the review form or list to `film` through `data-film-id`.
    #[must_use]
    pub fn bound_to(mut self, film: FilmId) -> Self {
        self.bound_film = Some(film);
        self
    }

    /// Paths visited before this one, oldest first.
    #[must_use]
    pub fn with_history(mut self, paths: &[&str]) -> Self {
        *self.history.get_mut() = paths.iter().map(ToString::to_string).collect();
        self
    }

    /// Accept back navigation without ever leaving the page.
    #[must_use]
    pub fn ignoring_back(mut self) -> Self {
        self.history_moves = false;
        self
    }

    /// Show `name` in the user menu.
    #[must_use]
    pub fn with_username(mut self, name: &str) -> Self {
        self.username = Some(name.to_string());
        self
    }

    /// Answer every confirmation prompt with "cancel".
    #[must_use]
    pub fn declining_confirm(mut self) -> Self {
        self.confirm_answer = false;
        self
    }

    /// Readable nodes returned to read-aloud.
    #[must_use]
    pub fn with_readable(mut self, nodes: Vec<ReadableNode>) -> Self {
        self.readable = nodes;
        self
    }

    /// Pretend the browser has no speech synthesis.
    #[must_use]
    pub fn without_speech(mut self) -> Self {
        self.speech_supported = false;
        self
    }

    /// Notices shown so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Most recent notice.
    #[must_use]
    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    /// URLs navigated to.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    /// Number of page reloads.
    #[must_use]
    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }

    /// Confirmation prompts shown.
    #[must_use]
    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.borrow().clone()
    }

    /// Busy/release calls in order.
    #[must_use]
    pub fn busy_events(&self) -> Vec<BusyEvent> {
        self.busy.borrow().clone()
    }

    /// Last pressed state pushed for `film`.
    #[must_use]
    pub fn like_state(&self, film: FilmId) -> Option<bool> {
        self.like_states
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| *id == film)
            .map(|(_, liked)| *liked)
    }

    /// Last pressed state pushed to the control named `control`.
    #[must_use]
    pub fn control_like_state(&self, control: &str) -> Option<bool> {
        self.control_likes
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == control)
            .map(|(_, liked)| *liked)
    }

    /// Last like count pushed for `film`.
    #[must_use]
    pub fn like_count(&self, film: FilmId) -> Option<u64> {
        self.like_counts
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| *id == film)
            .map(|(_, count)| *count)
    }

    /// Own-interaction refreshes.
    #[must_use]
    pub fn own_views(&self) -> Vec<OwnInteractionView> {
        self.own_views.borrow().clone()
    }

    /// Film aggregate refreshes.
    #[must_use]
    pub fn stats_views(&self) -> Vec<FilmStatsView> {
        self.stats_views.borrow().clone()
    }

    /// Every review list markup written, oldest first.
    #[must_use]
    pub fn reviews_renders(&self) -> Vec<String> {
        self.reviews_html.borrow().clone()
    }

    /// Review list markup currently on the page.
    #[must_use]
    pub fn reviews_html(&self) -> Option<String> {
        self.reviews_html.borrow().last().cloned()
    }

    /// Pagination markup currently on the page.
    #[must_use]
    pub fn pagination_html(&self) -> Option<String> {
        self.pagination_html.borrow().last().cloned()
    }

    /// Last submit enablement.
    #[must_use]
    pub fn submit_enabled(&self) -> Option<bool> {
        self.submit_enabled.borrow().last().copied()
    }

    /// Last character counter text.
    #[must_use]
    pub fn char_counter(&self) -> Option<String> {
        self.counters.borrow().last().cloned()
    }

    /// Languages applied to the document.
    #[must_use]
    pub fn languages(&self) -> Vec<LocaleCode> {
        self.languages.borrow().clone()
    }

    /// Last accessibility options applied.
    #[must_use]
    pub fn accessibility(&self) -> Option<AccessibilityPrefs> {
        self.accessibility.borrow().last().copied()
    }

    /// Last panel state.
    #[must_use]
    pub fn panel_open(&self) -> Option<bool> {
        self.panel.borrow().last().copied()
    }

    /// Live-region announcements.
    #[must_use]
    pub fn announcements(&self) -> Vec<String> {
        self.announcements.borrow().clone()
    }

    /// Blocking alerts.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Speech requests.
    #[must_use]
    pub fn spoken(&self) -> Vec<(String, LocaleCode)> {
        self.spoken.borrow().clone()
    }

    /// Times the search input was focused.
    #[must_use]
    pub fn search_focused(&self) -> usize {
        self.search_focused.get()
    }

    /// Times the menus were closed.
    #[must_use]
    pub fn menus_closed(&self) -> usize {
        self.menus_closed.get()
    }

    /// Last mobile navigation state.
    #[must_use]
    pub fn nav_menu_open(&self) -> Option<bool> {
        self.nav_menu.borrow().last().copied()
    }

    /// Last user dropdown state.
    #[must_use]
    pub fn user_menu_open(&self) -> Option<bool> {
        self.user_menu.borrow().last().copied()
    }

    /// Times history was stepped back.
    #[must_use]
    pub fn back_steps(&self) -> usize {
        self.back_steps.get()
    }

    /// Path currently shown.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.location.borrow().path.clone()
    }
}

impl PageSurface for RecordingSurface {
    type Control = String;

    fn location(&self) -> PageLocation {
        self.location.borrow().clone()
    }

    fn bound_film(&self) -> Option<FilmId> {
        self.bound_film
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirmations.borrow_mut().push(message.to_string());
        self.confirm_answer
    }

    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }

    fn set_busy(&self, control: &Self::Control, label: Option<&str>) {
        self.busy.borrow_mut().push(BusyEvent {
            control: control.clone(),
            busy: true,
            label: label.map(str::to_string),
        });
    }

    fn release(&self, control: &Self::Control, label: Option<&str>) {
        self.busy.borrow_mut().push(BusyEvent {
            control: control.clone(),
            busy: false,
            label: label.map(str::to_string),
        });
    }

    fn set_like_state(&self, film: FilmId, control: &Self::Control, liked: bool) {
        self.like_states.borrow_mut().push((film, liked));
        self.control_likes
            .borrow_mut()
            .push((control.clone(), liked));
    }

    fn set_like_count(&self, film: FilmId, count: u64) {
        self.like_counts.borrow_mut().push((film, count));
    }

    fn show_own_interaction(&self, view: &OwnInteractionView) {
        self.own_views.borrow_mut().push(view.clone());
    }

    fn show_film_stats(&self, view: &FilmStatsView) {
        self.stats_views.borrow_mut().push(view.clone());
    }

    fn replace_reviews(&self, html: &str) {
        self.reviews_html.borrow_mut().push(html.to_string());
    }

    fn replace_pagination(&self, html: &str) {
        self.pagination_html.borrow_mut().push(html.to_string());
    }

    fn current_username(&self) -> Option<String> {
        self.username.clone()
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.borrow_mut().push(enabled);
    }

    fn set_char_counter(&self, text: &str) {
        self.counters.borrow_mut().push(text.to_string());
    }

    fn apply_language(&self, language: LocaleCode) {
        self.languages.borrow_mut().push(language);
    }

    fn apply_accessibility(&self, prefs: &AccessibilityPrefs) {
        self.accessibility.borrow_mut().push(*prefs);
    }

    fn set_panel_open(&self, open: bool) {
        self.panel.borrow_mut().push(open);
    }

    fn announce(&self, message: &str) {
        self.announcements.borrow_mut().push(message.to_string());
    }

    fn focus_search(&self) {
        self.search_focused.set(self.search_focused.get() + 1);
    }

    fn close_menus(&self) {
        self.menus_closed.set(self.menus_closed.get() + 1);
    }

    fn set_nav_menu_open(&self, open: bool) {
        self.nav_menu.borrow_mut().push(open);
    }

    fn set_user_menu_open(&self, open: bool) {
        self.user_menu.borrow_mut().push(open);
    }

    fn history_back(&self) -> bool {
        let Some(previous) = self.history.borrow_mut().pop() else {
            return false;
        };
        self.back_steps.set(self.back_steps.get() + 1);
        if self.history_moves {
            let mut location = self.location.borrow_mut();
            location.path = previous;
            location.query.clear();
        }
        true
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn readable_nodes(&self) -> Vec<ReadableNode> {
        self.readable.clone()
    }

    fn speak(&self, text: &str, language: LocaleCode) -> bool {
        if !self.speech_supported {
            return false;
        }
        self.spoken.borrow_mut().push((text.to_string(), language));
        true
    }
}

/// Map-backed [`KeyValueStore`].
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `key = value`.
    #[must_use]
    pub fn with(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Store whose writes always fail.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Raw stored value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write {
                key: key.to_string(),
                detail: "quota exceeded".to_string(),
            });
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelnotes_ui::services::http::Method;

    fn get(path: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            path: path.to_string(),
            body: None,
        }
    }

    fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            content_type: Some("application/json".into()),
            url: String::new(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn script_is_consumed_in_order() {
        let transport = ScriptedTransport::new();
        transport.respond(ok("first"));
        transport.fail("offline");

        let first = transport.send(get("/a")).await.expect("first reply");
        assert_eq!(first.body, "first");
        let second = transport.send(get("/b")).await.expect_err("second fails");
        assert_eq!(second.detail, "offline");
        let third = transport.send(get("/c")).await.expect_err("script exhausted");
        assert_eq!(third.detail, "no scripted response");
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn gated_reply_waits_for_gate() {
        let transport = ScriptedTransport::new();
        let gate = transport.gate();
        let (reply, ()) = tokio::join!(transport.send(get("/slow")), async move {
            gate.open(ok("late"));
        });
        assert_eq!(reply.expect("gated reply").body, "late");
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let store = MemoryStore::new().with("language", "zh").read_only();
        assert_eq!(store.get("language").as_deref(), Some("zh"));
        assert!(store.set("language", "en").is_err());
    }
}
