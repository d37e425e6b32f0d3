use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::user,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    base: BaseRepository<user::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// Names the unique index a racing insert tripped over.
fn duplicate_error(err: DbErr, user: &User) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            UserError::DuplicateEmail(user.email.clone())
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            UserError::DuplicateUsername(user.username.clone())
        }
        _ => UserError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let model = self
            .base
            .insert(user.clone().into())
            .await
            .map_err(|e| duplicate_error(e, &user))?;

        tracing::info!(user_id = %model.id, username = %model.username, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.base.find_by_id(id).await?.map(User::from))
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.base.db())
            .await?;
        Ok(model.map(User::from))
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = user::Entity::find()
            .filter(Expr::cust_with_values(
                "LOWER(users.email) = LOWER(?)",
                [email.to_string()],
            ))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }
}
