//! Shared application state.

use axum_helpers::JwtAuth;

/// Cloned into every domain router at startup; clones share the pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    pub jwt_auth: JwtAuth,
}
