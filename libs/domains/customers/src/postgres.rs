use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity::customer,
    error::{CustomerError, CustomerResult},
    models::{Customer, UpdateCustomer},
    repository::CustomerRepository,
};

pub struct PgCustomerRepository {
    base: BaseRepository<customer::Entity>,
}

impl PgCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn get_by_id(&self, id: Uuid) -> CustomerResult<Option<Customer>> {
        Ok(self.base.find_by_id(id).await?.map(Customer::from))
    }

    async fn find_by_user(&self, user_id: Uuid) -> CustomerResult<Option<Customer>> {
        let model = customer::Entity::find()
            .filter(customer::Column::UserId.eq(user_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(Customer::from))
    }

    async fn create(&self, customer: Customer) -> CustomerResult<Customer> {
        let model = self.base.insert(customer.into()).await?;

        tracing::info!(customer_id = %model.id, user_id = %model.user_id, "Created customer");
        Ok(model.into())
    }

    async fn get_or_create_for_user(&self, user_id: Uuid) -> CustomerResult<Customer> {
        let inserted = customer::Entity::insert(customer::ActiveModel::from(Customer::for_user(
            user_id,
        )))
        .on_conflict(
            OnConflict::column(customer::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.base.db())
        .await?;

        if inserted > 0 {
            tracing::info!(user_id = %user_id, "Created customer on first access");
        }

        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| CustomerError::Internal(format!("customer for user {user_id} vanished")))
    }

    async fn update(&self, id: Uuid, input: UpdateCustomer) -> CustomerResult<Customer> {
        let mut customer: Customer = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?
            .into();
        customer.apply(input);

        let model = self.base.update(customer.into()).await?;

        tracing::info!(customer_id = %id, "Updated customer");
        Ok(model.into())
    }
}
