//! Integration tests driving the full router.

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use beatstore::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = common::temp_db_url("api");
    config.security = common::plaintext_security();

    let store = beatstore::db::Store::new(&config.general.database_path)
        .await
        .expect("Failed to open store");
    let state = beatstore::api::create_app_state(config, store, None);
    beatstore::api::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_user(app: &Router, username: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        Some(json!({
            "username": username,
            "password": "secret",
            "email": format!("{username}@example.com"),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

async fn create_beat(app: &Router, creator_id: i64, genre: &str, bpm: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/beats",
        Some(json!({
            "creator_id": creator_id,
            "title": format!("{genre} {bpm}"),
            "genre": genre,
            "key": "A minor",
            "bpm": bpm,
            "tags": "test",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/system/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = send(&app, "GET", "/api/system/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_user_responses_hide_password() {
    let app = spawn_app().await;
    let id = create_user(&app, "madlib").await;

    let (status, body) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "madlib");
    assert!(body["data"].get("password").is_none());

    let (status, body) = send(&app, "GET", "/api/users/by-username/madlib", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let app = spawn_app().await;
    create_user(&app, "kenny").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"username": "kenny", "password": "x", "email": "k@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_and_delete_user() {
    let app = spawn_app().await;
    let id = create_user(&app, "before").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{id}"),
        Some(json!({"username": "after", "password": "pw2", "email": "after@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "after");

    let (status, _) = send(&app, "DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_listing_validation_errors() {
    let app = spawn_app().await;

    let cases = [
        ("/api/beats?page_id=0&page_size=5&order=ID", None),
        ("/api/beats?page_id=1&page_size=11&order=ID", None),
        ("/api/beats?page_id=1&page_size=5&order=id", None),
        (
            "/api/beats?page_id=1&page_size=5&order=BPM&min=120&max=100",
            Some("invalid bpm range supplied"),
        ),
        (
            "/api/beats?page_id=1&page_size=5&order=BPM&min=90",
            Some("invalid bpm range supplied"),
        ),
        (
            "/api/beats?page_id=1&page_size=5&order=KEY",
            Some("invalid key supplied"),
        ),
        (
            "/api/beats?page_id=1&page_size=5&order=GENRE&genre=",
            Some("invalid genre supplied"),
        ),
        ("/api/beats?page_id=abc&page_size=5&order=ID", None),
        ("/api/users?page_id=1&page_size=50", None),
        ("/api/users/1/likes?page_id=1", None),
    ];

    for (uri, message) in cases {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        if let Some(message) = message {
            assert_eq!(body["error"], message, "{uri}");
        }
    }
}

#[tokio::test]
async fn test_beat_listing_over_http() {
    let app = spawn_app().await;
    let creator = create_user(&app, "dilla").await;

    for bpm in [85, 90, 95] {
        create_beat(&app, creator, "LOFI", bpm).await;
    }
    create_beat(&app, creator, "TRAP", 140).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/beats?page_id=1&page_size=5&order=BPM&min=90&max=140",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let bpms: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["bpm"].as_i64().unwrap())
        .collect();
    assert_eq!(bpms, vec![90, 95, 140]);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/users/{creator}/beats?page_id=1&page_size=5&order=GENRE&genre=LOFI"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_beat_for_unknown_creator() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/beats",
        Some(json!({
            "creator_id": 77,
            "title": "orphan",
            "genre": "TRAP",
            "key": "C minor",
            "bpm": 140,
            "tags": "x",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_like_flow() {
    let app = spawn_app().await;
    let user = create_user(&app, "fan").await;
    let beat = create_beat(&app, user, "DRILL", 142).await;

    let like = json!({"user_id": user, "beat_id": beat});

    let (status, body) = send(&app, "POST", "/api/likes", Some(like.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["beat"]["likes_count"], 1);

    let (status, _) = send(&app, "POST", "/api/likes", Some(like)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "GET", &format!("/api/likes/{user}/{beat}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], user);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/beats/{beat}/likes?page_id=1&page_size=5"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/likes/{user}/{beat}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/likes/{user}/{beat}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", &format!("/api/beats/{beat}"), None).await;
    assert_eq!(body["data"]["likes_count"], 0);

    let (status, _) = send(&app, "GET", &format!("/api/likes/{user}/0"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/beats",
        Some(json!({"creator_id": 1, "title": "missing fields"})),
    )
    .await;
    assert!(status.is_client_error(), "{status}");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_username_lookup_rejections_use_envelope() {
    let app = spawn_app().await;
    create_user(&app, "kenny").await;

    let (status, body) = send(&app, "GET", "/api/users/by-username/kenny", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "kenny");

    // %FF decodes to invalid UTF-8
    let (status, body) = send(&app, "GET", "/api/users/by-username/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string(), "{body}");
}
