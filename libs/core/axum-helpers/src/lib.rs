//! # Axum Helpers
//!
//! Shared building blocks for the storefront HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT tokens, middleware and the [`AuthUser`] extractor
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: UUID path and validated JSON extractors
//! - **[`nullable`]**: absent vs `null` for clearable update fields
//! - **[`pagination`]**: page-number pagination with `next`/`previous` links
//! - **[`audit`]**: audit logging
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &cors_config)?;
//! create_production_app(router, &server_config, async {}).await?;
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod nullable;
pub mod pagination;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, AuthUser, JwtAuth, JwtClaims, JwtConfig, REFRESH_TOKEN_TTL, TokenPair,
    TokenType, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{NestedUuidPath, UuidPath, ValidatedJson};

pub use pagination::{PAGE_SIZE, Page, PageRequest};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
