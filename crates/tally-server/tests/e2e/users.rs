//! Profile and user-statistics end-to-end tests.

use super::common::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn profile_roundtrip() {
    let app = test_app().await;
    let (_, credential) = login(&app, "ada@example.com").await;
    let token = Some(credential.as_str());

    let (status, body) = get(&app, "/api/user/profile", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["name"].is_null());

    let (status, body) = put(
        &app,
        "/api/user/profile",
        token,
        json!({ "name": "Ada Lovelace" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["message"], "Profile updated successfully");

    let (_, body) = get(&app, "/api/user/profile", token).await;
    assert_eq!(body["data"]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn profile_name_is_validated() {
    let app = test_app().await;
    let (_, credential) = login(&app, "a@example.com").await;
    let token = Some(credential.as_str());

    let (status, body) = put(&app, "/api/user/profile", token, json!({ "name": "A" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["details"][0]["field"], "name");

    let (status, _) = put(&app, "/api/user/profile", token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_stats_aggregate_spending() {
    let app = test_app().await;
    let (_, credential) = login(&app, "a@example.com").await;
    let token = Some(credential.as_str());

    let today = chrono::Utc::now().date_naive().to_string();
    for (amount, category) in [(10.0, "Food"), (30.0, "Travel")] {
        let (status, _) = post(
            &app,
            "/api/expenses",
            token,
            json!({
                "title": "x",
                "amount": amount,
                "category": category,
                "date": today,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/api/user/stats", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_expenses"], 2);
    assert_eq!(body["data"]["total_amount"], 40.0);
    assert_eq!(body["data"]["average_amount"], 20.0);
    assert_eq!(body["data"]["categories_used"], 2);
    assert_eq!(body["data"]["monthly_total"], 40.0);
}

#[tokio::test]
async fn user_routes_require_a_session() {
    let app = test_app().await;

    for path in ["/api/user/profile", "/api/user/stats"] {
        let (status, _) = get(&app, path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
    }
}
