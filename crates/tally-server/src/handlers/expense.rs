//! Expense endpoints. All of them sit behind the session gate.

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validation::{self, ExpensePayload, ListQuery};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{Value, json};

/// `POST /api/expenses`
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ExpensePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new_expense = validation::validate_expense(payload)?;
    let expense = state.expenses().create(user.id, new_expense).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": expense,
            "message": "Expense created successfully",
        })),
    ))
}

/// `GET /api/expenses` — filtered, sorted, paginated listing.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = validation::validate_list_query(query)?;
    let page = state.expenses().list(user.id, &query).await?;

    Ok(Json(json!({
        "status": "success",
        "data": page.expenses,
        "pagination": page.pagination,
    })))
}

/// `GET /api/expenses/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let expense = state.expenses().get(user.id, id).await?;
    Ok(Json(json!({ "status": "success", "data": expense })))
}

/// `PUT /api/expenses/{id}`
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<ExpensePayload>,
) -> Result<Json<Value>, ApiError> {
    let new_expense = validation::validate_expense(payload)?;
    let expense = state.expenses().update(user.id, id, new_expense).await?;

    Ok(Json(json!({
        "status": "success",
        "data": expense,
        "message": "Expense updated successfully",
    })))
}

/// `DELETE /api/expenses/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.expenses().delete(user.id, id).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Expense deleted successfully",
    })))
}

/// `GET /api/expenses/categories`
pub async fn categories(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let categories = state.expenses().categories(user.id).await?;
    Ok(Json(json!({ "status": "success", "data": categories })))
}

/// `GET /api/expenses/stats`
pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let stats = state.expenses().stats(user.id).await?;
    Ok(Json(json!({ "status": "success", "data": stats })))
}
