use reelnotes_test_support::fixtures::{
    controller, controller_with, film, interaction_payload, ok_json, review_json, reviews_payload,
};
use reelnotes_test_support::mocks::{MemoryStore, RecordingSurface};
use reelnotes_ui::UiConfig;
use reelnotes_ui::core::actions::{ClickTarget, UiAction, resolve_click};
use reelnotes_ui::core::draft::DraftFields;
use reelnotes_ui::core::feed::EchoPhase;

fn film_page() -> RecordingSurface {
    RecordingSurface::on_page("/films/42").with_username("ana")
}

#[tokio::test]
async fn loads_requested_page_and_renders_pagination() {
    let ctl = controller(film_page(), MemoryStore::new());
    ctl.client().transport().respond(ok_json(&reviews_payload(
        vec![
            review_json("cy", Some(5), "Stunning"),
            review_json("dee", None, "Slow burn"),
        ],
        2,
        11,
    )));

    assert!(ctl.load_reviews(film(42), 2).await);

    assert_eq!(
        ctl.client().transport().requests()[0].path,
        "/api/reviews/42?page=2&per_page=5"
    );
    let surface = ctl.surface();
    let list = surface.reviews_html().expect("list");
    assert!(list.contains("<strong>cy</strong>"));
    assert!(list.contains("5/5 ★"));
    assert!(list.contains("2024-05-01 09:30"));
    let pagination = surface.pagination_html().expect("pagination");
    assert!(pagination.contains("Page 2 / 3"));
    assert!(pagination.contains(r#"data-page="1""#));
    assert!(pagination.contains(r#"data-page="3""#));
    assert_eq!(ctl.state().feed.page(), 2);
}

#[tokio::test]
async fn single_page_has_no_pagination_controls() {
    let ctl = controller(film_page(), MemoryStore::new());
    ctl.client().transport().respond(ok_json(&reviews_payload(
        vec![review_json("cy", Some(3), "Fine")],
        1,
        1,
    )));

    assert!(ctl.load_reviews(film(42), 1).await);
    assert_eq!(ctl.surface().pagination_html().as_deref(), Some(""));
}

#[tokio::test]
async fn page_size_follows_configuration() {
    let config = UiConfig {
        reviews_per_page: 10,
        ..UiConfig::default()
    };
    let ctl = controller_with(film_page(), MemoryStore::new(), config);
    ctl.client()
        .transport()
        .respond(ok_json(&reviews_payload(Vec::new(), 1, 0)));

    ctl.load_reviews(film(42), 1).await;

    assert_eq!(
        ctl.client().transport().requests()[0].path,
        "/api/reviews/42?page=1&per_page=10"
    );
}

#[tokio::test]
async fn failed_load_keeps_current_list() {
    let ctl = controller(film_page(), MemoryStore::new());
    ctl.client().transport().fail("offline");

    assert!(!ctl.load_reviews(film(42), 2).await);

    let surface = ctl.surface();
    assert!(surface.reviews_renders().is_empty());
    assert!(surface.pagination_html().is_none());
    assert!(surface.notices().is_empty());
}

#[tokio::test]
async fn pagination_click_loads_that_page_of_the_current_film() {
    let ctl = controller(film_page(), MemoryStore::new());
    ctl.client()
        .transport()
        .respond(ok_json(&reviews_payload(Vec::new(), 3, 15)));
    let target = ClickTarget {
        action: Some("review-page".into()),
        page: Some("3".into()),
        ..ClickTarget::default()
    };
    let action = resolve_click(&target, ctl.page_film()).expect("page action");
    assert_eq!(
        action,
        UiAction::ReviewPage {
            film: film(42),
            page: 3
        }
    );

    ctl.dispatch(action, &"next".to_string()).await;

    assert_eq!(
        ctl.client().transport().requests()[0].path,
        "/api/reviews/42?page=3&per_page=5"
    );
}

#[tokio::test]
async fn page_past_the_end_is_reported_as_requested() {
    let ctl = controller(film_page(), MemoryStore::new());
    ctl.client().transport().respond(ok_json(&reviews_payload(
        vec![review_json("eve", Some(2), "Page three row")],
        3,
        10,
    )));

    assert!(ctl.load_reviews(film(42), 3).await);

    let surface = ctl.surface();
    assert!(surface.reviews_html().expect("list").contains("Page three row"));
    let pagination = surface.pagination_html().expect("pagination");
    assert!(pagination.contains("Page 3 / 2"));
    assert!(pagination.contains(r#"data-page="2">Previous"#));
    assert!(!pagination.contains("Next"));
    assert_eq!(ctl.state().feed.page(), 3);
}

#[tokio::test]
async fn pagination_on_a_bound_page_carries_and_uses_the_film() {
    let surface = RecordingSurface::on_page("/profile/reviews").bound_to(film(42));
    let ctl = controller(surface, MemoryStore::new());
    let transport = ctl.client().transport();
    transport.respond(ok_json(&reviews_payload(Vec::new(), 1, 12)));
    transport.respond(ok_json(&reviews_payload(Vec::new(), 2, 12)));

    assert_eq!(ctl.page_film(), Some(film(42)));
    assert!(ctl.load_reviews(film(42), 1).await);
    let pagination = ctl.surface().pagination_html().expect("pagination");
    assert!(pagination.contains(r#"data-film-id="42""#));

    let next = ClickTarget {
        action: Some("review-page".into()),
        page: Some("2".into()),
        film_id: Some("42".into()),
        ..ClickTarget::default()
    };
    let action = resolve_click(&next, None).expect("page action");
    ctl.dispatch(action, &"next".to_string()).await;

    assert_eq!(
        transport.requests()[1].path,
        "/api/reviews/42?page=2&per_page=5"
    );
}

#[tokio::test]
async fn late_answer_to_older_load_is_discarded() {
    let ctl = controller(film_page(), MemoryStore::new());
    let transport = ctl.client().transport();
    let first = transport.gate();
    let second = transport.gate();
    let page_one = ok_json(&reviews_payload(
        vec![review_json("old", Some(1), "First page")],
        1,
        10,
    ));
    let page_two = ok_json(&reviews_payload(
        vec![review_json("new", Some(5), "Second page")],
        2,
        10,
    ));

    let (older, newer, ()) = tokio::join!(
        ctl.load_reviews(film(42), 1),
        ctl.load_reviews(film(42), 2),
        async move {
            second.open(page_two);
            tokio::task::yield_now().await;
            first.open(page_one);
        }
    );

    assert!(newer);
    assert!(!older);
    let list = ctl.surface().reviews_html().expect("list");
    assert!(list.contains("Second page"));
    assert!(!list.contains("First page"));
    assert_eq!(ctl.surface().reviews_renders().len(), 1);
    assert_eq!(ctl.state().feed.page(), 2);
}

#[tokio::test]
async fn load_started_before_echo_cannot_overwrite_reconciled_list() {
    let ctl = controller(film_page(), MemoryStore::new());
    let transport = ctl.client().transport();
    let hydrate = transport.gate();
    transport.respond(ok_json(&interaction_payload(
        Some(4),
        true,
        "Great film",
        None,
        4.2,
    )));
    transport.respond(ok_json(&reviews_payload(
        vec![
            review_json("ana", Some(4), "Great film"),
            review_json("bo", Some(2), "Too long"),
        ],
        1,
        2,
    )));
    let stale_page = ok_json(&reviews_payload(
        vec![review_json("zed", Some(3), "Stale entry")],
        1,
        1,
    ));
    let fields = DraftFields {
        rating: "4".into(),
        liked: true,
        review: "Great film".into(),
    };

    let (hydrated, ()) = tokio::join!(ctl.load_reviews(film(42), 1), async {
        let follow_up = ctl
            .submit_interaction(film(42), &fields, &"submit".to_string())
            .await
            .expect("reconcile follow-up");
        ctl.run_follow_up(follow_up).await;
        hydrate.open(stale_page);
    });

    assert!(!hydrated);
    let list = ctl.surface().reviews_html().expect("list");
    assert!(list.contains("<strong>bo</strong>"));
    assert!(!list.contains("Stale entry"));
    assert!(!list.contains("review-new"));
    assert_eq!(ctl.state().feed.phase(), EchoPhase::Reconciled);
}
