//! Stateless JWT authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 access/refresh tokens
//! - [`optional_jwt_auth_middleware`] attaches verified access-token claims to the request
//! - [`AuthUser`] pulls the caller identity out of a handler's request or answers 401
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, optional_jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let app = Router::new()
//!     .route("/customers/me", get(me))
//!     .layer(axum::middleware::from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use extractor::AuthUser;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, REFRESH_TOKEN_TTL, TokenPair, TokenType};
pub use middleware::optional_jwt_auth_middleware;
