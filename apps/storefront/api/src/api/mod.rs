use axum::{Router, middleware, routing::get};
use axum_helpers::optional_jwt_auth_middleware;

pub mod auth;
pub mod carts;
pub mod catalog;
pub mod customers;
pub mod health;

use crate::state::AppState;

/// API routes without the `/api` prefix, which `create_router` adds.
///
/// Every domain router mounts itself at its resource URLs, so they merge side by side.
/// Bearer tokens are decoded for all routes; handlers that need a user extract `AuthUser`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(auth::router(state))
        .merge(catalog::router(state))
        .merge(carts::router(state))
        .merge(customers::router(state))
        .layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            optional_jwt_auth_middleware,
        ))
}

/// `/ready` with a live database check, merged next to the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
