//! Session-gating middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tally_auth::SessionClaims;

/// The authenticated caller, injected into request extensions by the
/// middleware below.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl From<SessionClaims> for CurrentUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Require a valid Bearer session credential.
///
/// A missing header is reported separately from a failed verification; both
/// deny access.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(ApiError::MissingToken)?;
    let claims = state.verifier().verify(&token)?;
    req.extensions_mut().insert(CurrentUser::from(claims));
    Ok(next.run(req).await)
}

/// Attach the caller when a valid credential is present; otherwise proceed
/// unauthenticated.
pub async fn optional_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match state.verifier().verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(CurrentUser::from(claims));
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid credential on optional route");
            }
        }
    }
    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let v = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let rest = v.strip_prefix("Bearer ")?.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}
