//! Magic-link and session endpoints.

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validation::{self, MagicLinkRequest};
use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};

/// `POST /api/auth/magic-link` — issue and dispatch a sign-in link.
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(req): Json<MagicLinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = validation::validate_magic_link(&req)?;
    let issued = state.issuer().issue(&email).await?;

    let mut body = json!({
        "status": "success",
        "success": true,
        "message": "Magic link sent to your email",
    });
    if let Some(link) = issued.echo {
        body["magicLink"] = json!(link);
    }
    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    token: Option<String>,
}

/// `GET /api/auth/verify` — redeem a token for a session credential.
pub async fn verify_magic_link(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<Value>, ApiError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Token is required".to_string()))?;

    let login = state.redeemer().redeem(&token).await?;

    Ok(Json(json!({
        "status": "success",
        "success": true,
        "user": login.user,
        "token": login.token,
    })))
}

/// `GET /api/auth/me` — identity carried by the presented credential.
pub async fn current_user(Extension(user): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "user": { "id": user.id, "email": user.email },
    }))
}

/// `POST /api/auth/logout` — sessions are stateless, logout is client-side
/// token disposal. The route runs behind the optional session gate: an
/// invalid credential is ignored rather than rejected.
pub async fn logout() -> Json<Value> {
    Json(json!({ "status": "success", "message": "Logged out successfully" }))
}
