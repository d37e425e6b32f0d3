//! Users Domain
//!
//! Account registration and stateless JWT login.
//!
//! # Features
//!
//! - Registration with Argon2 password hashing
//! - Access/refresh token pairs for username + password
//! - Access token refresh
//! - The current user behind an access token
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth/users, /auth/users/me, /auth/jwt/{create,refresh}
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← password hashing, credential checks, token issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← InMemoryUserRepository, PgUserRepository
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, UserResponse, request DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-32-characters!!").unwrap());
//! let service = UserService::new(InMemoryUserRepository::new(), jwt);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{AccessToken, CreateUser, TokenCreate, TokenRefresh, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
