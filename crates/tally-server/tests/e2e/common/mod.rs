//! Shared test infrastructure for Tally end-to-end tests.
//!
//! Builds the full router over an in-memory SQLite database and drives it
//! through `tower::ServiceExt::oneshot`, so every test exercises the real
//! wire surface (routing, middleware, validation, envelope).

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tally_core::{Environment, TallyConfig};
use tally_server::{routes, state::AppState};
use tower::ServiceExt;

pub fn test_config() -> TallyConfig {
    let mut cfg = TallyConfig::default();
    cfg.environment = Environment::Test;
    cfg.auth.session_secret = "e2e-secret".to_string();
    cfg
}

pub async fn test_app() -> Router {
    test_app_with(test_config()).await
}

pub async fn test_app_with(cfg: TallyConfig) -> Router {
    let pool = tally_store::connect_in_memory()
        .await
        .expect("in-memory sqlite");
    routes::router(AppState::from_pool(pool, &cfg))
}

/// Fire one request and decode the JSON body (Null when empty).
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }

    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, path, token, None).await
}

pub async fn post(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, path, token, Some(body)).await
}

pub async fn put(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, Method::PUT, path, token, Some(body)).await
}

pub async fn delete(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, path, token, None).await
}

/// Walk the whole magic-link flow for `email` and return (user id, session
/// credential). Relies on the test environment echoing the link.
pub async fn login(app: &Router, email: &str) -> (i64, String) {
    let (status, body) = post(
        app,
        "/api/auth/magic-link",
        None,
        serde_json::json!({ "email": email }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "magic-link request failed: {body}");

    let link = body["magicLink"]
        .as_str()
        .expect("magic link echoed outside production");
    let token = link
        .split("token=")
        .nth(1)
        .expect("token query parameter")
        .to_string();

    let (status, body) = get(app, &format!("/api/auth/verify?token={token}"), None).await;
    assert_eq!(status, StatusCode::OK, "redemption failed: {body}");

    let user_id = body["user"]["id"].as_i64().expect("user id");
    let credential = body["token"].as_str().expect("session credential").to_string();
    (user_id, credential)
}
