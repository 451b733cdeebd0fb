//! Canned API payloads and controller assembly.

use crate::mocks::{MemoryStore, RecordingSurface, ScriptedTransport};
use reelnotes_ui::UiConfig;
use reelnotes_ui::core::film::FilmId;
use reelnotes_ui::core::prefs::PreferenceStore;
use reelnotes_ui::features::PageController;
use reelnotes_ui::services::http::{ApiClient, RawResponse};
use serde_json::{Value, json};

/// Controller wired to the in-memory fakes.
pub type TestController = PageController<ScriptedTransport, RecordingSurface, MemoryStore>;

/// Assemble a controller over fresh fakes with the default configuration.
#[must_use]
pub fn controller(surface: RecordingSurface, store: MemoryStore) -> TestController {
    controller_with(surface, store, UiConfig::default())
}

/// Assemble a controller with an explicit configuration.
#[must_use]
pub fn controller_with(
    surface: RecordingSurface,
    store: MemoryStore,
    config: UiConfig,
) -> TestController {
    let client = ApiClient::new(
        ScriptedTransport::new(),
        config.api_base.clone(),
        config.login_path.clone(),
    );
    PageController::new(client, surface, PreferenceStore::new(store), config)
}

/// Film id that must be valid.
#[must_use]
pub fn film(raw: u64) -> FilmId {
    FilmId::new(raw).expect("non-zero film id")
}

/// JSON response with the given status.
#[must_use]
pub fn json_response(status: u16, body: &Value) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("application/json".to_string()),
        url: String::new(),
        body: body.to_string(),
    }
}

/// Successful JSON response.
#[must_use]
pub fn ok_json(body: &Value) -> RawResponse {
    json_response(200, body)
}

/// HTML response whose final URL is `url`.
#[must_use]
pub fn html_response(status: u16, url: &str) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("text/html; charset=utf-8".to_string()),
        url: url.to_string(),
        body: "<!doctype html><html><body>page</body></html>".to_string(),
    }
}

/// JSON-typed response whose body does not decode.
#[must_use]
pub fn malformed_response() -> RawResponse {
    RawResponse {
        status: 200,
        content_type: Some("application/json".to_string()),
        url: String::new(),
        body: "{\"success\": tru".to_string(),
    }
}

/// Bare 401.
#[must_use]
pub fn unauthorized() -> RawResponse {
    json_response(401, &json!({"success": false, "message": "Login required"}))
}

/// `{success: false}` with an optional message.
#[must_use]
pub fn rejection(status: u16, message: Option<&str>) -> RawResponse {
    let body = match message {
        Some(message) => json!({"success": false, "message": message}),
        None => json!({"success": false}),
    };
    json_response(status, &body)
}

/// Like toggle answer.
#[must_use]
pub fn like_payload(liked: bool, like_count: u64) -> Value {
    json!({
        "success": true,
        "liked": liked,
        "like_count": like_count,
        "message": if liked { "Liked" } else { "Unliked" },
    })
}

/// One entry of a reviews page.
#[must_use]
pub fn review_json(username: &str, rating: Option<u8>, text: &str) -> Value {
    json!({
        "user": {"id": 1, "username": username},
        "rating": rating,
        "created_at": "2024-05-01T09:30:00",
        "review_text": text,
    })
}

/// A reviews page.
#[must_use]
pub fn reviews_payload(entries: Vec<Value>, page: u32, total: u64) -> Value {
    json!({
        "success": true,
        "data": entries,
        "page": page,
        "per_page": 5,
        "total": total,
    })
}

/// Interaction save answer. `review` is the server's review object, if any.
#[must_use]
pub fn interaction_payload(
    rating: Option<u8>,
    liked: bool,
    review_text: &str,
    review: Option<Value>,
    average_rating: f64,
) -> Value {
    json!({
        "success": true,
        "message": "Interaction saved",
        "data": {
            "rating": rating,
            "liked": liked,
            "has_review": !review_text.is_empty(),
            "review_text": review_text,
            "created_at": "2024-06-01T12:00:00",
            "review": review,
            "film_stats": {
                "average_rating": average_rating,
                "like_count": 10,
                "rating_count": 5,
            },
        },
    })
}

/// Delete answer.
#[must_use]
pub fn deleted_payload() -> Value {
    json!({"success": true, "message": "Interaction deleted"})
}
