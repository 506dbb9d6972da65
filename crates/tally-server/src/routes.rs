//! Route table for the Tally API.

use crate::handlers;
use crate::middleware::auth::{optional_session, require_session};
use crate::state::AppState;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(handlers::auth::current_user))
        .route(
            "/api/user/profile",
            get(handlers::user::profile).put(handlers::user::update_profile),
        )
        .route("/api/user/stats", get(handlers::user::stats))
        .route(
            "/api/expenses",
            post(handlers::expense::create).get(handlers::expense::list),
        )
        .route(
            "/api/expenses/categories",
            get(handlers::expense::categories),
        )
        .route("/api/expenses/stats", get(handlers::expense::stats))
        .route(
            "/api/expenses/{id}",
            get(handlers::expense::get_by_id)
                .put(handlers::expense::update)
                .delete(handlers::expense::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let open = Router::new()
        .route("/", get(handlers::health))
        .route(
            "/api/auth/magic-link",
            post(handlers::auth::request_magic_link),
        )
        .route("/api/auth/verify", get(handlers::auth::verify_magic_link))
        .route(
            "/api/auth/logout",
            post(handlers::auth::logout)
                .layer(from_fn_with_state(state.clone(), optional_session)),
        );

    Router::new()
        .merge(open)
        .merge(protected)
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
