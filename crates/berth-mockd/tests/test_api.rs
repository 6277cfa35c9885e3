//! Wire-level checks of the mock API.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use berth_mockd::{AppState, router};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn app() -> Router {
    router(AppState::new("admin", "admin"))
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(path: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/auth/internal",
            None,
            serde_json::json!({"user": "admin", "pass": "admin"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["token_type"], "Bearer");
    json["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_version_are_public() {
    let app = app().await;

    let response = app.clone().oneshot(get("/api/v0/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");

    let response = app.clone().oneshot(get("/api/v0/version", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_requires_and_honors_the_bearer() {
    let app = app().await;

    let response = app.clone().oneshot(get("/api/v0/auth/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let response = app
        .clone()
        .oneshot(get("/api/v0/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "admin");
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/auth/internal",
            None,
            serde_json::json!({"user": "admin", "pass": "nope"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("credentials"));
}

#[tokio::test]
async fn session_lifecycle_over_the_wire() {
    let app = app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/workspaces",
            Some(&token),
            serde_json::json!({"name": "Dev"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let workspace = body_json(response).await;
    let ws_id = workspace["id"].as_str().unwrap().to_string();

    // status omitted: the backend defaults it to stopped
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v0/workspaces/{ws_id}/sessions"),
            Some(&token),
            serde_json::json!({"name": "builder"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    assert_eq!(session["status"], "stopped");
    let session_id = session["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v0/workspaces/{ws_id}/sessions/{session_id}/start"),
            Some(&token),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "running");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v0/workspaces/{ws_id}/sessions/{session_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn start_on_missing_session_is_404() {
    let app = app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/workspaces/nope/sessions/nope/start",
            Some(&token),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_twice_is_byte_equal() {
    let app = router(AppState::seeded("admin", "admin").await);
    let token = login(&app).await;

    let first = body_bytes(
        app.clone()
            .oneshot(get("/api/v0/workspaces", Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    let second = body_bytes(
        app.clone()
            .oneshot(get("/api/v0/workspaces", Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first, second);
}
