mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use common::TempDb;
use todoboard::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> (TempDb, Router) {
    spawn_app_with(Config::default()).await
}

async fn spawn_app_with(mut config: Config) -> (TempDb, Router) {
    let db = TempDb::new("todoboard-api-test");
    config.general.database_path = db.url();

    let state = todoboard::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    (db, todoboard::api::router(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}

async fn create_user(app: &Router) -> Value {
    let (status, body) = send(app, "POST", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn create_list(app: &Router, user_id: &Value) -> Value {
    let (status, body) = send(app, "POST", "/todolists", Some(json!({ "user_id": user_id }))).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_ping() {
    let (_db, app) = spawn_app().await;

    let (status, body) = send(&app, "GET", "/_ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("PONG".to_string()));
}

#[tokio::test]
async fn test_user_endpoints() {
    let (_db, app) = spawn_app().await;

    let (status, body) = send(&app, "POST", "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());

    let user = &body;
    assert!(user["id"].is_i64());
    assert!(user["username"].is_string());
    assert!(user["lastUsedTodolistId"].is_null());

    let (status, body) = send(&app, "GET", &format!("/users/{}", user["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], user["username"]);

    let (status, body) = send(&app, "GET", "/users/4242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("4242"));
}

#[tokio::test]
async fn test_todolist_endpoints() {
    let (_db, app) = spawn_app().await;
    let user = create_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/todolists/",
        Some(json!({ "user_id": user["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = &body;
    assert_eq!(list["user_id"], user["id"]);
    let slug = list["slug"].as_str().unwrap();
    assert_eq!(slug.len(), 12);

    let (_, body) = send(&app, "GET", &format!("/users/{}", user["id"]), None).await;
    assert_eq!(body["lastUsedTodolistId"], list["id"]);

    let (status, body) = send(&app, "GET", &format!("/todolists/{}", list["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "GET", &format!("/todolists/slug/{slug}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], list["id"]);

    let (status, _) = send(&app, "GET", "/todolists/slug/zzz-zzzz-zzz", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/todolists", Some(json!({ "user_id": 999 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_todo_lifecycle() {
    let (_db, app) = spawn_app().await;
    let user = create_user(&app).await;
    let list = create_list(&app, &user["id"]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/todos",
        Some(json!({
            "title": "Buy milk",
            "user_id": user["id"],
            "todolist_id": list["id"],
            "column": "todo",
            "lastUpdated": "2024-10-01T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let todo = body;
    assert_eq!(todo["creator"], user["username"]);
    assert_eq!(todo["lastUpdated"], "2024-10-01T09:00:00Z");

    let (status, _) = send(
        &app,
        "POST",
        "/todos/update",
        Some(json!({
            "id": todo["id"],
            "column": "ongoing",
            "lastUpdated": "2024-10-01T10:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &format!("/todolists/{}", list["id"]), None).await;
    assert_eq!(body[0]["column"], "ongoing");
    assert_eq!(body[0]["lastUpdated"], "2024-10-01T10:00:00Z");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/todos/{}", todo["id"]),
        Some(json!({ "column": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &format!("/todolists/{}", list["id"]), None).await;
    assert_eq!(body[0]["column"], "done");

    let (status, _) = send(&app, "DELETE", &format!("/todos/{}", todo["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/todos/{}", todo["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &format!("/todolists/{}", list["id"]), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_todo_rejects_unknown_references() {
    let (_db, app) = spawn_app().await;
    let user = create_user(&app).await;
    let list = create_list(&app, &user["id"]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/todos/",
        Some(json!({
            "title": "Ghost",
            "user_id": 999,
            "todolist_id": list["id"],
            "column": "todo"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        "POST",
        "/todos",
        Some(json!({
            "title": "Ghost",
            "user_id": user["id"],
            "todolist_id": 999,
            "column": "todo"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", &format!("/todolists/{}", list["id"]), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_missing_todo_is_silent() {
    let (_db, app) = spawn_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/todos/update",
        Some(json!({ "id": 31337, "column": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let (_db, app) = spawn_app().await;

    let (status, body) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("not enabled"));
}

#[tokio::test]
async fn test_request_id_header() {
    let (_db, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/_ping")
                .header("x-request-id", "board-client-17")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "board-client-17");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/_ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

async fn preflight(app: &Router, origin: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/todos/")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_cors_allows_credentials() {
    let (_db, app) = spawn_app().await;

    let response = preflight(&app, "http://localhost:5173").await;
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let response = preflight(&app, "http://evil.example").await;
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_cors_wildcard_mirrors_origin() {
    let mut config = Config::default();
    config.server.cors_allowed_origins = vec!["*".to_string()];
    let (_db, app) = spawn_app_with(config).await;

    let response = preflight(&app, "http://desktop.local:3000").await;
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://desktop.local:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
