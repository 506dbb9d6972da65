//! Magic-link and session end-to-end tests.

use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tally_core::Environment;

#[tokio::test]
async fn magic_link_flow_end_to_end() {
    let app = test_app().await;

    // Issue: the response carries the link outside production.
    let (status, body) = post(
        &app,
        "/api/auth/magic-link",
        None,
        json!({ "email": "a@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Magic link sent to your email");
    let link = body["magicLink"].as_str().expect("echoed link");
    assert!(link.contains("token="));

    // Redeem: identity resolved, credential minted.
    let token = link.split("token=").nth(1).unwrap();
    let (status, body) = get(&app, &format!("/api/auth/verify?token={token}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "a@example.com");
    let credential = body["token"].as_str().expect("credential");
    assert!(!credential.is_empty());

    // The credential gates protected routes.
    let (status, body) = get(&app, "/api/auth/me", Some(credential)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "a@example.com");

    // Second redemption of the same token always fails.
    let (status, body) = get(&app, &format!("/api/auth/verify?token={token}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired magic link");
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/auth/magic-link",
        None,
        json!({ "email": "invalid-email" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn missing_email_is_rejected() {
    let app = test_app().await;

    let (status, body) = post(&app, "/api/auth/magic-link", None, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
}

#[tokio::test]
async fn verify_requires_a_token_parameter() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/auth/verify", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Token is required");
}

#[tokio::test]
async fn unknown_token_gets_the_generic_message() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/auth/verify?token=not-a-real-token", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired magic link");
}

#[tokio::test]
async fn protected_routes_distinguish_missing_from_invalid() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token required");

    let (status, body) = get(&app, "/api/auth/me", Some("garbage-jwt")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn repeat_logins_reuse_the_identity() {
    let app = test_app().await;

    let (first_id, _) = login(&app, "repeat@example.com").await;
    let (second_id, _) = login(&app, "repeat@example.com").await;
    assert_eq!(first_id, second_id);
}

#[tokio::test]
async fn logout_succeeds_with_and_without_a_session() {
    let app = test_app().await;

    let (status, body) = post(&app, "/api/auth/logout", None, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let (_, credential) = login(&app, "a@example.com").await;
    let (status, _) = post(&app, "/api/auth/logout", Some(&credential), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    // An invalid credential is swallowed on this route, not rejected.
    let (status, _) = post(&app, "/api/auth/logout", Some("garbage"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn production_mode_never_echoes_the_link() {
    let mut cfg = test_config();
    cfg.environment = Environment::Production;
    let app = test_app_with(cfg).await;

    let (status, body) = post(
        &app,
        "/api/auth/magic-link",
        None,
        json!({ "email": "a@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body.get("magicLink").is_none());
}
