use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::{JwtAuth, TokenPair, TokenType};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AccessToken, CreateUser, TokenCreate, TokenRefresh, User, UserResponse};
use crate::repository::UserRepository;

fn validate(input: &impl Validate) -> UserResult<()> {
    input
        .validate()
        .map_err(|e| UserError::Validation(e.to_string()))
}

/// Registration and token issuance.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Create an account with an argon2-hashed password
    pub async fn register(&self, input: CreateUser) -> UserResult<UserResponse> {
        validate(&input)?;

        if self.repository.username_exists(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(&input.password)?;
        let created = self.repository.create(User::new(input, password_hash)).await?;
        Ok(created.into())
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;
        Ok(user.into())
    }

    /// Access and refresh tokens for valid credentials.
    ///
    /// An unknown username and a wrong password fail the same way.
    pub async fn create_tokens(&self, input: TokenCreate) -> UserResult<(User, TokenPair)> {
        validate(&input)?;

        let user = self
            .repository
            .get_by_username(&input.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let tokens = self
            .jwt
            .create_token_pair(user.id, &user.username, &user.email)
            .map_err(|e| UserError::Internal(e.to_string()))?;
        Ok((user, tokens))
    }

    /// A new access token for a valid refresh token of an existing user.
    pub async fn refresh_access(&self, input: TokenRefresh) -> UserResult<AccessToken> {
        validate(&input)?;

        let claims = self
            .jwt
            .verify_typed(&input.refresh, TokenType::Refresh)
            .map_err(|e| {
                tracing::debug!("Refresh token rejected: {}", e);
                UserError::InvalidToken
            })?;
        let user_id = claims.user_id().ok_or(UserError::InvalidToken)?;

        let user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or(UserError::InvalidToken)?;

        let access = self
            .jwt
            .create_token(user.id, &user.username, &user.email, TokenType::Access)
            .map_err(|e| UserError::Internal(e.to_string()))?;
        Ok(AccessToken { access })
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
