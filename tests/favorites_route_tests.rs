use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

async fn test_app(tag: &str) -> Router {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "nlsql-favorites-route-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let db = nlsql::db::spawn(&database_url)
        .await
        .expect("failed to spawn db actor");
    nlsql::server::nlsql_router(nlsql::server::NlsqlState::new(db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn users_favorite() -> Value {
    json!({ "query_text": "Show me all users", "sql_text": "SELECT * FROM users" })
}

#[tokio::test]
async fn get_favorites_on_empty_store() {
    let app = test_app("empty").await;

    let (status, body) = send(&app, "GET", "/api/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "favorites": [], "total": 0, "error": null }));
}

#[tokio::test]
async fn post_then_get_returns_item() {
    let app = test_app("post").await;

    let (status, body) = send(&app, "POST", "/api/favorites", Some(users_favorite())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["already_exists"], json!(false));
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["favorite"]["query_text"], json!("Show me all users"));
    assert_eq!(body["favorite"]["sql_text"], json!("SELECT * FROM users"));
    assert!(body["favorite"]["id"].as_i64().is_some_and(|id| id > 0));
    assert!(body["favorite"]["created_at"].is_string());

    let (status, body) = send(&app, "GET", "/api/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["favorites"][0]["query_text"], json!("Show me all users"));
}

#[tokio::test]
async fn post_duplicate_reports_already_exists() {
    let app = test_app("duplicate").await;

    send(&app, "POST", "/api/favorites", Some(users_favorite())).await;
    let (status, body) = send(&app, "POST", "/api/favorites", Some(users_favorite())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["already_exists"], json!(true));
    assert_eq!(body["favorite"], Value::Null);

    let (_, body) = send(&app, "GET", "/api/favorites", None).await;
    assert_eq!(body["total"], json!(1));
}

#[tokio::test]
async fn post_rejects_bad_bodies() {
    let app = test_app("bad-body").await;

    // Missing sql_text.
    let (status, body) = send(
        &app,
        "POST",
        "/api/favorites",
        Some(json!({ "query_text": "Show me all users" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Blank query_text.
    let (status, body) = send(
        &app,
        "POST",
        "/api/favorites",
        Some(json!({ "query_text": "   ", "sql_text": "SELECT 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["already_exists"], json!(false));

    let (_, body) = send(&app, "GET", "/api/favorites", None).await;
    assert_eq!(body["total"], json!(0));
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let app = test_app("delete").await;

    let (_, body) = send(&app, "POST", "/api/favorites", Some(users_favorite())).await;
    let id = body["favorite"]["id"].as_i64().expect("id");

    let (status, body) = send(&app, "DELETE", &format!("/api/favorites/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": true }));

    let (status, body) = send(&app, "DELETE", "/api/favorites/99999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": false }));

    let (status, _) = send(&app, "DELETE", "/api/favorites/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = test_app("request-id").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/favorites")
                .header("x-request-id", "trace-me-42")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("trace-me-42")
    );

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/no/such/route")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-request-id"));
}
