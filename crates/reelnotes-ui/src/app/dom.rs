//! `web-sys` implementation of the page surface.

use crate::core::a11y::{
    HIDDEN_SELECTOR, READABLE_SELECTOR, ReadableNode, SKIP_LINK_CLASS, SKIP_LINK_TARGET,
    SKIP_LINK_TEXT, SPEECH_RATE, accessibility_panel_html, high_contrast_label,
    screen_reader_label,
};
use crate::core::actions::CARD_SELECTOR;
use crate::core::display::{FilmStatsView, OwnInteractionView, like_button_markup};
use crate::core::film::FilmId;
use crate::core::location::{PageLocation, back_button_visible};
use crate::core::prefs::AccessibilityPrefs;
use crate::i18n::LocaleCode;
use crate::surface::{Notice, PageSurface};
use gloo::utils::{body, document, window};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, SpeechSynthesisUtterance};

const NOTICE_TTL_MS: u32 = 3_000;
const HIGHLIGHT_TTL_MS: u32 = 900;
const ANNOUNCE_TTL_MS: u32 = 1_000;

/// Every element matching `selector`.
pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Ok(list) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element matching `selector`.
pub(crate) fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

fn set_display(element: &Element, visible: bool) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }
}

fn set_disabled(element: &Element, disabled: bool) {
    if disabled {
        let _ = element.set_attribute("disabled", "");
    } else {
        let _ = element.remove_attribute("disabled");
    }
}

/// Insert the floating accessibility panel unless the template already has one.
pub(crate) fn install_accessibility_panel() {
    if document().get_element_by_id("accessibility-panel").is_some() {
        return;
    }
    let Ok(panel) = document().create_element("div") else {
        return;
    };
    panel.set_id("accessibility-panel");
    panel.set_class_name("accessibility-panel");
    panel.set_inner_html(&accessibility_panel_html());
    let _ = body().append_child(&panel);
}

/// Make sure exactly one skip link exists, hidden until focused.
pub(crate) fn install_skip_link() {
    let existing = query_all(&format!(".{SKIP_LINK_CLASS}"));
    if let Some((first, extra)) = existing.split_first() {
        for link in extra {
            link.remove();
        }
        let _ = first.remove_attribute("style");
        let _ = first.class_list().add_1("sr-only");
        return;
    }
    let Ok(link) = document().create_element("a") else {
        return;
    };
    let _ = link.set_attribute("href", SKIP_LINK_TARGET);
    link.set_class_name(&format!("{SKIP_LINK_CLASS} sr-only"));
    link.set_text_content(Some(SKIP_LINK_TEXT));
    let _ = body().insert_before(&link, body().first_child().as_ref());
}

/// Let keyboard users reach and activate the clickable cards.
pub(crate) fn prepare_cards() {
    for card in query_all(CARD_SELECTOR) {
        if let Some(html) = card.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("cursor", "pointer");
        }
        if !card.has_attribute("tabindex") {
            let _ = card.set_attribute("tabindex", "0");
        }
        if !card.has_attribute("role") {
            let _ = card.set_attribute("role", "link");
        }
    }
}

/// Hide the back button when there is nowhere to go back to.
pub(crate) fn prepare_back_button() {
    let Some(button) = document().get_element_by_id("back-button") else {
        return;
    };
    let history_len = window().history().and_then(|history| history.length()).unwrap_or(0);
    let host = window().location().hostname().unwrap_or_default();
    let visible = back_button_visible(history_len, &document().referrer(), &host);
    if let Some(html) = button.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if visible { "inline-flex" } else { "none" });
    }
}

fn paint_like(button: &Element, liked: bool) {
    let _ = button.set_attribute("aria-pressed", if liked { "true" } else { "false" });
    let _ = button.class_list().toggle_with_force("liked", liked);
    button.set_inner_html(like_button_markup(liked));
}

/// The live document.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DomSurface;

impl PageSurface for DomSurface {
    type Control = Element;

    fn location(&self) -> PageLocation {
        let location = window().location();
        PageLocation::new(
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default(),
        )
    }

    fn bound_film(&self) -> Option<FilmId> {
        query("#interaction-form[data-film-id], #reviews-container[data-film-id]")
            .and_then(|element| element.get_attribute("data-film-id"))
            .as_deref()
            .and_then(FilmId::parse)
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = window().location().set_href(url) {
            tracing::warn!(url, error = ?err, "navigation failed");
        }
    }

    fn reload(&self) {
        if let Err(err) = window().location().reload() {
            tracing::warn!(error = ?err, "reload failed");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        window().confirm_with_message(message).unwrap_or(false)
    }

    fn notify(&self, notice: &Notice) {
        let Ok(alert) = document().create_element("div") else {
            return;
        };
        alert.set_class_name(&format!("alert alert-{}", notice.kind.css_modifier()));
        let _ = alert.set_attribute("role", "alert");
        let _ = alert.set_attribute("aria-live", "polite");
        alert.set_text_content(Some(&notice.text));
        let container = query(".container").unwrap_or_else(|| body().into());
        let _ = container.insert_before(&alert, container.first_child().as_ref());
        if let Some(live) = document().get_element_by_id("aria-live") {
            live.set_text_content(Some(&notice.text));
        }
        Timeout::new(NOTICE_TTL_MS, move || alert.remove()).forget();
    }

    fn set_busy(&self, control: &Element, label: Option<&str>) {
        set_disabled(control, true);
        let _ = control.set_attribute("aria-busy", "true");
        let _ = control.class_list().add_1("processing");
        if let Some(label) = label {
            control.set_text_content(Some(label));
        }
    }

    fn release(&self, control: &Element, label: Option<&str>) {
        set_disabled(control, false);
        let _ = control.remove_attribute("aria-busy");
        let _ = control.class_list().remove_1("processing");
        if let Some(label) = label {
            control.set_text_content(Some(label));
        }
    }

    fn set_like_state(&self, film: FilmId, control: &Element, liked: bool) {
        let selector = format!(
            r#".like-btn[data-film-id="{film}"], .btn-like[data-film-id="{film}"], [data-action="like"][data-film-id="{film}"]"#
        );
        paint_like(control, liked);
        for button in query_all(&selector) {
            if !button.is_same_node(Some(control.as_ref())) {
                paint_like(&button, liked);
            }
        }
    }

    fn set_like_count(&self, film: FilmId, count: u64) {
        for counter in query_all(&format!(r#"[data-like-count="{film}"]"#)) {
            counter.set_text_content(Some(&count.to_string()));
        }
    }

    fn show_own_interaction(&self, view: &OwnInteractionView) {
        if let (Some(display), Some(text)) = (query(".rating-display"), &view.rating_text) {
            display.set_text_content(Some(text));
        }
        if let Some(status) = query(".like-status") {
            set_display(&status, view.liked);
        }
        if let Some(review) = query(".review-display") {
            set_display(&review, view.review_text.is_some());
            if let (Some(text), Ok(Some(paragraph))) =
                (&view.review_text, review.query_selector("p"))
            {
                paragraph.set_text_content(Some(text));
            }
        }
    }

    fn show_film_stats(&self, view: &FilmStatsView) {
        if let Some(average) = &view.average_rating {
            for element in query_all(".rating-value") {
                element.set_text_content(Some(average));
            }
        }
        for element in query_all(".likes") {
            element.set_text_content(Some(&view.likes));
        }
        for element in query_all(".rating-count") {
            element.set_text_content(Some(&view.rating_count));
        }
    }

    fn replace_reviews(&self, html: &str) {
        let Some(container) = document().get_element_by_id("reviews-container") else {
            return;
        };
        container.set_inner_html(html);
        if html.contains("review-new") {
            Timeout::new(HIGHLIGHT_TTL_MS, || {
                for entry in query_all("#reviews-container .review-new") {
                    let _ = entry.class_list().remove_1("review-new");
                }
            })
            .forget();
        }
    }

    fn replace_pagination(&self, html: &str) {
        if let Some(container) = document().get_element_by_id("reviews-pagination") {
            container.set_inner_html(html);
        }
    }

    fn current_username(&self) -> Option<String> {
        query(".user-menu-trigger span").and_then(|span| span.text_content())
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if let Some(button) = query(r#"#interaction-form button[type="submit"]"#) {
            set_disabled(&button, !enabled);
        }
    }

    fn set_char_counter(&self, text: &str) {
        let counter = query("#interaction-form .comment-counter").or_else(|| {
            let textarea = query("#interaction-form #review")?;
            let counter = document().create_element("div").ok()?;
            counter.set_class_name("comment-counter");
            textarea.parent_node()?.append_child(&counter).ok()?;
            Some(counter)
        });
        if let Some(counter) = counter {
            counter.set_text_content(Some(text));
        }
    }

    fn apply_language(&self, language: LocaleCode) {
        if let Some(root) = document().document_element() {
            let _ = root.set_attribute("lang", language.code());
        }
        if let Some(label) = document().get_element_by_id("current-lang") {
            label.set_text_content(Some(language.badge()));
        }
    }

    fn apply_accessibility(&self, prefs: &AccessibilityPrefs) {
        let Some(root) = document().document_element() else {
            return;
        };
        let classes = root.class_list();
        let _ = classes.toggle_with_force("high-contrast", prefs.high_contrast);
        let _ = classes.toggle_with_force("screen-reader-mode", prefs.screen_reader_mode);
        if let Some(html) = root.dyn_ref::<HtmlElement>() {
            let _ = html
                .style()
                .set_property("font-size", &format!("{}%", prefs.font_percent()));
        }
        if let Some(label) = query("#high-contrast .accessibility-label") {
            label.set_text_content(Some(high_contrast_label(prefs.high_contrast)));
        }
        if let Some(label) = query("#screen-reader-mode .accessibility-label") {
            label.set_text_content(Some(screen_reader_label(prefs.screen_reader_mode)));
        }
    }

    fn set_panel_open(&self, open: bool) {
        if let Some(menu) = query(".accessibility-menu") {
            let _ = menu.class_list().toggle_with_force("show", open);
        }
        if let Some(toggle) = query(".accessibility-toggle") {
            let _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
            if let Some(html) = toggle.dyn_ref::<HtmlElement>() {
                let _ = html.focus();
            }
        }
    }

    fn announce(&self, message: &str) {
        let Ok(region) = document().create_element("div") else {
            return;
        };
        let _ = region.set_attribute("aria-live", "polite");
        let _ = region.set_attribute("aria-atomic", "true");
        region.set_class_name("sr-only");
        region.set_text_content(Some(message));
        let _ = body().append_child(&region);
        Timeout::new(ANNOUNCE_TTL_MS, move || region.remove()).forget();
    }

    fn focus_search(&self) {
        if let Some(input) = query(r#"input[name="search"]"#)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            let _ = input.focus();
        }
    }

    fn close_menus(&self) {
        for menu in query_all(".accessibility-menu.show, .mobile-menu.show") {
            let _ = menu.class_list().remove_1("show");
        }
        if let Some(toggle) = query(".accessibility-toggle") {
            let _ = toggle.set_attribute("aria-expanded", "false");
        }
    }

    fn set_nav_menu_open(&self, open: bool) {
        if let Some(menu) = query(".nav-menu") {
            let _ = menu.class_list().toggle_with_force("mobile-menu-open", open);
        }
        if let Some(toggle) = query(".mobile-menu-toggle") {
            let _ = toggle.class_list().toggle_with_force("active", open);
            let _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
        }
    }

    fn set_user_menu_open(&self, open: bool) {
        if let Some(dropdown) = query(".user-menu-dropdown") {
            let _ = dropdown.class_list().toggle_with_force("show", open);
        }
    }

    fn history_back(&self) -> bool {
        let Ok(history) = window().history() else {
            return false;
        };
        if history.length().unwrap_or(0) <= 1 {
            return false;
        }
        history.back().is_ok()
    }

    fn alert(&self, message: &str) {
        let _ = window().alert_with_message(message);
    }

    fn readable_nodes(&self) -> Vec<ReadableNode> {
        let root: Element = query("main").unwrap_or_else(|| body().into());
        let Ok(list) = root.query_selector_all(READABLE_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| ReadableNode {
                tag: element.tag_name().to_ascii_lowercase(),
                text: element.text_content().unwrap_or_default(),
                hidden: element.closest(HIDDEN_SELECTOR).ok().flatten().is_some(),
            })
            .collect()
    }

    fn speak(&self, text: &str, language: LocaleCode) -> bool {
        let Ok(synth) = window().speech_synthesis() else {
            return false;
        };
        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
            return false;
        };
        synth.cancel();
        utterance.set_lang(language.code());
        utterance.set_rate(SPEECH_RATE);
        utterance.set_pitch(1.0);
        synth.speak(&utterance);
        true
    }
}
