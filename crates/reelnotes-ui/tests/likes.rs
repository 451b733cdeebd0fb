use reelnotes_test_support::fixtures::{
    controller, controller_with, film, html_response, like_payload, malformed_response, ok_json,
    rejection, unauthorized,
};
use reelnotes_test_support::mocks::{BusyEvent, MemoryStore, RecordingSurface};
use reelnotes_ui::UiConfig;
use reelnotes_ui::core::actions::{ClickTarget, resolve_click};
use reelnotes_ui::services::http::Method;
use reelnotes_ui::surface::Notice;
use serde_json::json;

fn button() -> String {
    "like-42".to_string()
}

#[tokio::test]
async fn toggle_applies_server_state_to_every_like_control() {
    let ctl = controller(RecordingSurface::on_page("/films/42"), MemoryStore::new());
    ctl.client()
        .transport()
        .respond(ok_json(&like_payload(true, 7)));

    ctl.toggle_like(film(42), &button()).await;

    let requests = ctl.client().transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/api/like/42");
    assert_eq!(requests[0].body, None);

    let surface = ctl.surface();
    assert_eq!(surface.like_state(film(42)), Some(true));
    assert_eq!(surface.like_count(film(42)), Some(7));
    assert_eq!(surface.like_state(film(7)), None);
    assert_eq!(surface.control_like_state(&button()), Some(true));
    assert_eq!(surface.last_notice(), Some(Notice::success("Liked")));
    assert_eq!(
        surface.busy_events(),
        vec![
            BusyEvent {
                control: button(),
                busy: true,
                label: None
            },
            BusyEvent {
                control: button(),
                busy: false,
                label: None
            },
        ]
    );
}

#[tokio::test]
async fn missing_message_falls_back_to_like_updated() {
    let ctl = controller(RecordingSurface::on_page("/films/42"), MemoryStore::new());
    ctl.client().transport().respond(ok_json(&json!({
        "success": true,
        "liked": false,
        "like_count": 3
    })));

    ctl.toggle_like(film(42), &button()).await;

    let surface = ctl.surface();
    assert_eq!(surface.like_state(film(42)), Some(false));
    assert_eq!(surface.like_count(film(42)), Some(3));
    assert_eq!(surface.last_notice(), Some(Notice::success("Like updated")));
}

#[tokio::test]
async fn unauthorized_navigates_to_login_with_return_path() {
    let surface = RecordingSurface::on_page("/films/42").with_query("?tab=reviews");
    let ctl = controller(surface, MemoryStore::new());
    ctl.client().transport().respond(unauthorized());

    ctl.toggle_like(film(42), &button()).await;

    let surface = ctl.surface();
    assert_eq!(
        surface.navigations(),
        vec!["/login?next=%2Ffilms%2F42%3Ftab%3Dreviews".to_string()]
    );
    assert!(surface.notices().is_empty());
    assert_eq!(surface.like_state(film(42)), None);
    assert_eq!(surface.busy_events().len(), 2, "control released");
}

#[tokio::test]
async fn html_login_page_navigates_to_final_url() {
    let ctl = controller(RecordingSurface::on_page("/films/42"), MemoryStore::new());
    ctl.client()
        .transport()
        .respond(html_response(200, "https://reelnotes.test/login?next=/films/42"));

    ctl.toggle_like(film(42), &button()).await;

    assert_eq!(
        ctl.surface().navigations(),
        vec!["https://reelnotes.test/login?next=/films/42".to_string()]
    );
}

#[tokio::test]
async fn failures_show_an_error_and_leave_state_alone() {
    let cases = [
        (rejection(500, None), "Operation failed (500)"),
        (rejection(404, Some("Film not found")), "Film not found"),
        (html_response(502, "/api/like/42"), "Operation failed (502)"),
        (malformed_response(), "Unexpected server response, please retry"),
    ];
    for (response, expected) in cases {
        let ctl = controller(RecordingSurface::on_page("/films/42"), MemoryStore::new());
        ctl.client().transport().respond(response);

        ctl.toggle_like(film(42), &button()).await;

        let surface = ctl.surface();
        assert_eq!(surface.last_notice(), Some(Notice::error(expected)));
        assert_eq!(surface.like_state(film(42)), None);
        assert_eq!(surface.like_count(film(42)), None);
        assert!(surface.navigations().is_empty());
    }
}

#[tokio::test]
async fn network_failure_is_reported() {
    let ctl = controller(RecordingSurface::on_page("/films/42"), MemoryStore::new());
    ctl.client().transport().fail("connection reset");

    ctl.toggle_like(film(42), &button()).await;

    assert_eq!(
        ctl.surface().last_notice(),
        Some(Notice::error("Network error, please retry"))
    );
}

#[tokio::test]
async fn clicked_like_button_is_dispatched_for_its_own_film() {
    let ctl = controller(RecordingSurface::on_page("/"), MemoryStore::new());
    ctl.client()
        .transport()
        .respond(ok_json(&like_payload(true, 12)));
    let target = ClickTarget {
        action: Some("like".into()),
        film_id: Some("9".into()),
        ..ClickTarget::default()
    };
    let action = resolve_click(&target, ctl.page_film()).expect("like action");

    let follow_up = ctl.dispatch(action, &"card-like".to_string()).await;

    assert_eq!(follow_up, None);
    assert_eq!(ctl.client().transport().requests()[0].path, "/api/like/9");
    assert_eq!(ctl.surface().like_count(film(9)), Some(12));
}

#[tokio::test]
async fn unbound_like_button_on_a_film_page_shows_the_new_state() {
    let ctl = controller(RecordingSurface::on_page("/films/42"), MemoryStore::new());
    let transport = ctl.client().transport();
    transport.respond(ok_json(&like_payload(true, 8)));
    transport.respond(ok_json(&like_payload(false, 7)));
    let target = ClickTarget {
        classes: vec!["like-btn".into()],
        ..ClickTarget::default()
    };
    let control = "plain-like".to_string();

    let action = resolve_click(&target, ctl.page_film()).expect("like action");
    ctl.dispatch(action.clone(), &control).await;
    assert_eq!(ctl.surface().control_like_state(&control), Some(true));

    ctl.dispatch(action, &control).await;
    assert_eq!(ctl.surface().control_like_state(&control), Some(false));
    assert_eq!(ctl.surface().like_count(film(42)), Some(7));
}

#[tokio::test]
async fn configured_api_base_prefixes_requests() {
    let config = UiConfig {
        api_base: "https://api.reelnotes.test/".into(),
        ..UiConfig::default()
    };
    let ctl = controller_with(RecordingSurface::on_page("/films/42"), MemoryStore::new(), config);
    ctl.client()
        .transport()
        .respond(ok_json(&like_payload(false, 0)));

    ctl.toggle_like(film(42), &button()).await;

    assert_eq!(
        ctl.client().transport().requests()[0].path,
        "https://api.reelnotes.test/api/like/42"
    );
}
