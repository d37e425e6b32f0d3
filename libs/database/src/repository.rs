//! Generic CRUD over any sea-orm entity keyed by a UUID.
//!
//! Domain repositories wrap a [`BaseRepository`] and add their own queries
//! on top of [`BaseRepository::db`].
//!
//! ```ignore
//! pub struct PgCollectionRepository {
//!     base: BaseRepository<collection::Entity>,
//! }
//!
//! let model = self.base.find_by_id(id).await?;
//! ```

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

pub struct BaseRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    /// Writes the `Set` columns of `model`; fails with `RecordNotUpdated` when no row matched.
    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    /// Number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::Set;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    mod tag {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "tags")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: Uuid,
            pub label: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn sample() -> tag::Model {
        tag::Model {
            id: Uuid::now_v7(),
            label: "sale".to_string(),
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_row() {
        let row = sample();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = BaseRepository::<tag::Entity>::new(db);

        assert_eq!(repo.find_by_id(row.id).await.unwrap(), Some(row));
    }

    #[tokio::test]
    async fn find_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tag::Model>::new()])
            .into_connection();
        let repo = BaseRepository::<tag::Entity>::new(db);

        assert_eq!(repo.find_by_id(Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_returns_stored_model() {
        let row = sample();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = BaseRepository::<tag::Entity>::new(db);

        let inserted = repo
            .insert(tag::ActiveModel {
                id: Set(row.id),
                label: Set(row.label.clone()),
            })
            .await
            .unwrap();

        assert_eq!(inserted, row);
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = BaseRepository::<tag::Entity>::new(db);

        assert_eq!(repo.delete_by_id(Uuid::now_v7()).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(Uuid::now_v7()).await.unwrap(), 0);
    }
}
