use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Authenticated caller, taken from claims placed by the JWT middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<JwtClaims>().ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided".into())
        })?;

        let id = claims
            .user_id()
            .ok_or_else(|| AppError::Unauthorized("Token subject is not a user id".into()))?;

        Ok(AuthUser {
            id,
            username: claims.username.clone(),
            email: claims.email.clone(),
        })
    }
}
