//! Profile endpoints.

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validation::{self, ProfilePayload};
use axum::extract::State;
use axum::{Extension, Json};
use serde_json::{Value, json};

/// `GET /api/user/profile`
pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles().get(user.id).await?;
    Ok(Json(json!({ "status": "success", "data": profile })))
}

/// `PUT /api/user/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Value>, ApiError> {
    let name = validation::validate_profile(&payload)?;
    let profile = state.profiles().update_name(user.id, &name).await?;

    Ok(Json(json!({
        "status": "success",
        "data": profile,
        "message": "Profile updated successfully",
    })))
}

/// `GET /api/user/stats`
pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let stats = state.profiles().stats(user.id).await?;
    Ok(Json(json!({ "status": "success", "data": stats })))
}
