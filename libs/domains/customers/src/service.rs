use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{CreateCustomer, Customer, UpdateCustomer};
use crate::repository::CustomerRepository;

fn validate(input: &impl Validate) -> CustomerResult<()> {
    input
        .validate()
        .map_err(|e| CustomerError::Validation(e.to_string()))
}

/// Customer profile use cases.
#[derive(Clone)]
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn get_customer(&self, id: Uuid) -> CustomerResult<Customer> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// One profile per user; a second one is refused.
    pub async fn create_customer(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        validate(&input)?;
        if self.repository.find_by_user(input.user_id).await?.is_some() {
            return Err(CustomerError::AlreadyExists(input.user_id));
        }
        self.repository.create(input.into_customer()).await
    }

    pub async fn update_customer(
        &self,
        id: Uuid,
        input: UpdateCustomer,
    ) -> CustomerResult<Customer> {
        validate(&input)?;
        self.repository.update(id, input).await
    }

    /// Profile of the calling user, created with defaults on first access.
    pub async fn me(&self, user_id: Uuid) -> CustomerResult<Customer> {
        self.repository.get_or_create_for_user(user_id).await
    }

    pub async fn update_me(&self, user_id: Uuid, input: UpdateCustomer) -> CustomerResult<Customer> {
        validate(&input)?;
        let customer = self.repository.get_or_create_for_user(user_id).await?;
        self.repository.update(customer.id, input).await
    }
}
