use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with a duplicate error when the username or email is taken
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> UserResult<bool>;

    /// Case-insensitive
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUsername(user.username));
        }
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email.eq_ignore_ascii_case(email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUser;

    fn user(username: &str, email: &str) -> User {
        User::new(
            CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                first_name: String::new(),
                last_name: String::new(),
                password: String::new(),
            },
            "$argon2id$hash".to_string(),
        )
    }

    #[tokio::test]
    async fn username_is_unique() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("mosh", "a@example.com")).await.unwrap();

        let err = repo.create(user("mosh", "b@example.com")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn email_is_unique_ignoring_case() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a", "Mosh@Example.com")).await.unwrap();

        assert!(repo.email_exists("mosh@example.com").await.unwrap());
        let err = repo.create(user("b", "MOSH@example.com")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn lookup_by_username() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("mosh", "a@example.com")).await.unwrap();

        let found = repo.get_by_username("mosh").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_username("MOSH").await.unwrap().is_none());
    }
}
