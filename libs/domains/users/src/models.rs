use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Letters, digits and `@ . + - _`
static USERNAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if !USERNAME.is_match(username) {
        return Err(validator::ValidationError::new("invalid_username"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), validator::ValidationError> {
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("password_entirely_numeric"));
    }
    Ok(())
}

/// Stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Account from a registration body and an already hashed password.
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            username: user.username,
        }
    }
}

/// Body of `POST /auth/users`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    /// Write-only
    #[validate(length(min = 8, max = 128), custom(function = "validate_password"))]
    pub password: String,
}

/// Body of `POST /auth/jwt/create`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenCreate {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of `POST /auth/jwt/refresh`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRefresh {
    #[validate(length(min = 1))]
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registration(username: &str, password: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: "mosh@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password: password.to_string(),
        }
    }

    #[test]
    fn response_exposes_only_public_fields() {
        let user = User::new(registration("mosh", "s3cret-pass"), "$argon2id$hash".to_string());
        let value = serde_json::to_value(UserResponse::from(user)).unwrap();

        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["email", "first_name", "id", "last_name", "username"]);
    }

    #[test]
    fn stored_user_never_serializes_its_hash() {
        let user = User::new(registration("mosh", "s3cret-pass"), "$argon2id$hash".to_string());
        let value = serde_json::to_value(user).unwrap();
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn username_charset_is_enforced() {
        assert!(registration("mosh.h+1@x", "s3cret-pass").validate().is_ok());
        assert!(registration("mosh hamedani", "s3cret-pass").validate().is_err());
    }

    #[test]
    fn weak_passwords_are_rejected() {
        assert!(registration("mosh", "short").validate().is_err());
        assert!(registration("mosh", "1234567890").validate().is_err());
    }

    #[test]
    fn names_default_to_empty() {
        let input: CreateUser = serde_json::from_value(json!({
            "username": "mosh",
            "email": "mosh@example.com",
            "password": "s3cret-pass"
        }))
        .unwrap();
        assert_eq!(input.first_name, "");
        assert_eq!(input.last_name, "");
    }
}
