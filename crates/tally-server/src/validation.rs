//! Request payload validation.
//!
//! Closed set of field-tagged failures; handlers reject the whole request
//! with a 400 envelope listing every failed rule.

use crate::error::ApiError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_ledger::{ExpenseQuery, NewExpense};

/// A single failed rule, tagged with the offending field.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

fn field_error(field: &str, message: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Body of `POST /api/auth/magic-link`.
#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: Option<String>,
}

pub fn validate_magic_link(req: &MagicLinkRequest) -> Result<String, ApiError> {
    let Some(email) = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    else {
        return Err(ApiError::Validation(vec![field_error(
            "email",
            "Email is required",
        )]));
    };

    if !is_valid_email(email) {
        return Err(ApiError::Validation(vec![field_error(
            "email",
            "Please provide a valid email address",
        )]));
    }

    Ok(email.to_string())
}

/// Syntax check only; deliverability is the notifier's problem.
fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}

/// Body of expense create/update.
#[derive(Debug, Deserialize)]
pub struct ExpensePayload {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

pub fn validate_expense(payload: ExpensePayload) -> Result<NewExpense, ApiError> {
    let mut errors = Vec::new();

    let title = match payload.title.as_deref().map(str::trim) {
        Some(t) if t.is_empty() => {
            errors.push(field_error("title", "Title is required"));
            None
        }
        Some(t) if t.len() > 255 => {
            errors.push(field_error("title", "Title must not exceed 255 characters"));
            None
        }
        Some(t) => Some(t.to_string()),
        None => {
            errors.push(field_error("title", "Title is required"));
            None
        }
    };

    let amount = match payload.amount {
        Some(a) if a.is_finite() && a > 0.0 => Some(a),
        Some(_) => {
            errors.push(field_error("amount", "Amount must be positive"));
            None
        }
        None => {
            errors.push(field_error("amount", "Amount is required"));
            None
        }
    };

    if let Some(c) = &payload.category {
        if c.len() > 100 {
            errors.push(field_error(
                "category",
                "Category must not exceed 100 characters",
            ));
        }
    }

    if let Some(d) = &payload.description {
        if d.len() > 1000 {
            errors.push(field_error(
                "description",
                "Description must not exceed 1000 characters",
            ));
        }
    }

    let date = match payload.date.as_deref() {
        Some(s) => parse_date("date", s, &mut errors),
        None => {
            errors.push(field_error("date", "Date is required"));
            None
        }
    };

    match (title, amount, date) {
        (Some(title), Some(amount), Some(date)) if errors.is_empty() => Ok(NewExpense {
            title,
            amount,
            category: payload.category,
            description: payload.description,
            date,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

/// Body of `PUT /api/user/profile`.
#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub name: Option<String>,
}

pub fn validate_profile(payload: &ProfilePayload) -> Result<String, ApiError> {
    let Some(name) = payload.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
        return Err(ApiError::Validation(vec![field_error(
            "name",
            "Name is required",
        )]));
    };

    if name.chars().count() < 2 {
        return Err(ApiError::Validation(vec![field_error(
            "name",
            "Name must be at least 2 characters long",
        )]));
    }
    if name.chars().count() > 100 {
        return Err(ApiError::Validation(vec![field_error(
            "name",
            "Name must not exceed 100 characters",
        )]));
    }

    Ok(name.to_string())
}

/// Query string of `GET /api/expenses`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
}

pub fn validate_list_query(query: ListQuery) -> Result<ExpenseQuery, ApiError> {
    let mut errors = Vec::new();

    let start_date = query
        .start_date
        .as_deref()
        .and_then(|s| parse_date("startDate", s, &mut errors));
    let end_date = query
        .end_date
        .as_deref()
        .and_then(|s| parse_date("endDate", s, &mut errors));

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(ExpenseQuery {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(10),
        sort_by: query.sort_by,
        sort_order: query.sort_order,
        category: query.category,
        start_date,
        end_date,
        search: query.search,
    })
}

fn parse_date(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(field_error(
                field,
                &format!("{field} must be in YYYY-MM-DD format"),
            ));
            None
        }
    }
}
