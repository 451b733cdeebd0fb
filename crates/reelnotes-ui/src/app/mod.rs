//! Browser wiring: boot, delegated listeners and timers.

mod dom;
mod storage;

use crate::config::UiConfig;
use crate::core::a11y::SKIP_LINK_CLASS;
use crate::core::actions::{
    ACTIONABLE_SELECTOR, CARD_SELECTOR, ClickTarget, activate_card, dismissal_for,
    interpret_shortcut, resolve_click,
};
use crate::core::draft::DraftFields;
use crate::core::film::FilmId;
use crate::core::prefs::PreferenceStore;
use crate::features::{FollowUp, PageController};
use crate::services::fetch::FetchTransport;
use crate::services::http::ApiClient;
use crate::surface::{Notice, PageSurface};
use crate::telemetry::{LogFormat, LoggingConfig, init_logging};
use anyhow::Context as _;
use dom::DomSurface;
use gloo::events::EventListener;
use gloo::utils::document;
use std::rc::Rc;
use storage::BrowserStore;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    KeyboardEvent,
};

type Controller = PageController<FetchTransport, DomSurface, BrowserStore>;

const CONFIG_ELEMENT_ID: &str = "reelnotes-config";
const FORM_ID: &str = "interaction-form";

/// Enhance the current page.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = boot() {
        gloo::console::error!(format!("reelnotes failed to start: {err:#}"));
    }
}

fn boot() -> anyhow::Result<()> {
    let (config, config_error) = load_config();
    init_logging(&LoggingConfig {
        level: &config.log_level,
        format: LogFormat::Console,
    })
    .context("installing logger")?;
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "ignoring page configuration");
    }

    dom::install_accessibility_panel();
    dom::install_skip_link();
    dom::prepare_cards();
    dom::prepare_back_button();
    let client = ApiClient::new(
        FetchTransport,
        config.api_base.clone(),
        config.login_path.clone(),
    );
    let controller = Rc::new(PageController::new(
        client,
        DomSurface,
        PreferenceStore::new(BrowserStore),
        config,
    ));
    controller.boot();

    bind_clicks(&controller);
    bind_shortcuts(&controller);
    bind_skip_link();
    bind_form(&controller);
    hydrate_reviews(&controller);
    tracing::info!("page enhanced");
    Ok(())
}

fn load_config() -> (UiConfig, Option<crate::error::ConfigError>) {
    let raw = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());
    match raw.as_deref().map(UiConfig::from_json) {
        None => (UiConfig::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (UiConfig::default(), Some(err)),
    }
}

async fn finish(controller: &Controller, follow_up: Option<FollowUp>) {
    let Some(follow_up) = follow_up else {
        return;
    };
    let delay = follow_up.delay();
    if !delay.is_zero() {
        gloo_timers::future::sleep(delay).await;
    }
    controller.run_follow_up(follow_up).await;
}

fn event_element(event: &Event) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
}

fn click_target(element: &Element, clicked: &Element) -> ClickTarget {
    let id = element.id();
    let inside_control = clicked
        .closest("a, button, input")
        .ok()
        .flatten()
        .is_some_and(|control| !control.is_same_node(Some(element.as_ref())));
    ClickTarget {
        action: element.get_attribute("data-action"),
        classes: element
            .class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        film_id: element.get_attribute("data-film-id"),
        page: element.get_attribute("data-page"),
        id: (!id.is_empty()).then_some(id),
        href: element.get_attribute("data-href"),
        default_url: element.get_attribute("data-default-url"),
        inside_control,
    }
}

fn bind_clicks(controller: &Rc<Controller>) {
    let controller = Rc::clone(controller);
    EventListener::new(&document(), "click", move |event| {
        let Some(clicked) = event_element(event) else {
            return;
        };
        let element = clicked.closest(ACTIONABLE_SELECTOR).ok().flatten();
        let action = element.as_ref().and_then(|element| {
            resolve_click(&click_target(element, &clicked), controller.page_film())
        });
        let in_nav_menu = clicked.closest(".nav-menu").ok().flatten().is_some();
        controller.dismiss_menus(dismissal_for(action.as_ref(), in_nav_menu));
        let (Some(element), Some(action)) = (element, action) else {
            return;
        };
        event.prevent_default();
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let follow_up = controller.dispatch(action, &element).await;
            finish(&controller, follow_up).await;
        });
    })
    .forget();
}

fn bind_skip_link() {
    for (event_name, hidden) in [("focusin", false), ("focusout", true)] {
        EventListener::new(&document(), event_name, move |event| {
            let Some(link) = event_element(event) else {
                return;
            };
            if link.class_list().contains(SKIP_LINK_CLASS) {
                let _ = link.class_list().toggle_with_force("sr-only", hidden);
            }
        })
        .forget();
    }
}

fn is_editing(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .is_some_and(|element| {
            matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA")
                || element.is_content_editable()
        })
}

fn bind_shortcuts(controller: &Rc<Controller>) {
    let controller = Rc::clone(controller);
    EventListener::new(&document(), "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let card = event_element(event)
            .filter(|element| element.matches(CARD_SELECTOR).unwrap_or(false));
        if let Some(card) = card {
            let href = card.get_attribute("data-href");
            if let Some(action) = activate_card(&key_event.key(), href.as_deref()) {
                event.prevent_default();
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    let follow_up = controller.dispatch(action, &card).await;
                    finish(&controller, follow_up).await;
                });
                return;
            }
        }
        let Some(outcome) =
            interpret_shortcut(&key_event.key(), key_event.alt_key(), is_editing(event))
        else {
            return;
        };
        if outcome.prevents_default() {
            event.prevent_default();
        }
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let follow_up = controller.handle_shortcut(outcome).await;
            finish(&controller, follow_up).await;
        });
    })
    .forget();
}

fn field_value(form: &Element, name: &str) -> String {
    let Ok(Some(field)) = form.query_selector(&format!(r#"[name="{name}"]"#)) else {
        return String::new();
    };
    if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_draft(form: &Element) -> DraftFields {
    let liked = form
        .query_selector(r#"[name="liked"]"#)
        .ok()
        .flatten()
        .and_then(|field| field.dyn_into::<HtmlInputElement>().ok())
        .is_some_and(|input| input.checked());
    DraftFields {
        rating: field_value(form, "rating"),
        liked,
        review: field_value(form, "review"),
    }
}

fn bind_form(controller: &Rc<Controller>) {
    let Some(form) = document().get_element_by_id(FORM_ID) else {
        return;
    };
    controller.update_draft(&read_draft(&form));

    for event_name in ["input", "change"] {
        let controller = Rc::clone(controller);
        let source = form.clone();
        EventListener::new(&form, event_name, move |_event| {
            controller.update_draft(&read_draft(&source));
        })
        .forget();
    }

    let controller = Rc::clone(controller);
    let source = form.clone();
    EventListener::new(&form, "submit", move |event| {
        event.prevent_default();
        let film = source
            .get_attribute("data-film-id")
            .as_deref()
            .and_then(FilmId::parse)
            .or_else(|| controller.page_film());
        let Some(film) = film else {
            controller
                .surface()
                .notify(&Notice::error("Unable to get film ID"));
            return;
        };
        let control = source
            .query_selector(r#"button[type="submit"]"#)
            .ok()
            .flatten()
            .unwrap_or_else(|| source.clone());
        let fields = read_draft(&source);
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let follow_up = controller.submit_interaction(film, &fields, &control).await;
            finish(&controller, follow_up).await;
        });
    })
    .forget();
}

fn hydrate_reviews(controller: &Rc<Controller>) {
    if document().get_element_by_id("reviews-container").is_none() {
        return;
    }
    let Some(film) = controller.page_film() else {
        return;
    };
    let controller = Rc::clone(controller);
    spawn_local(async move {
        controller.load_reviews(film, 1).await;
    });
}
