use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{Customer, UpdateCustomer};

/// Persistence for customer profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> CustomerResult<Option<Customer>>;

    async fn find_by_user(&self, user_id: Uuid) -> CustomerResult<Option<Customer>>;

    async fn create(&self, customer: Customer) -> CustomerResult<Customer>;

    /// The profile of `user_id`, inserted with defaults when missing.
    ///
    /// Concurrent calls for the same user yield the same row.
    async fn get_or_create_for_user(&self, user_id: Uuid) -> CustomerResult<Customer>;

    async fn update(&self, id: Uuid, input: UpdateCustomer) -> CustomerResult<Customer>;
}

/// In-memory customer store for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get_by_id(&self, id: Uuid) -> CustomerResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> CustomerResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| c.user_id == user_id).cloned())
    }

    async fn create(&self, customer: Customer) -> CustomerResult<Customer> {
        let mut customers = self.customers.write().await;
        if customers.values().any(|c| c.user_id == customer.user_id) {
            return Err(CustomerError::AlreadyExists(customer.user_id));
        }
        customers.insert(customer.id, customer.clone());

        tracing::info!(customer_id = %customer.id, user_id = %customer.user_id, "Created customer");
        Ok(customer)
    }

    async fn get_or_create_for_user(&self, user_id: Uuid) -> CustomerResult<Customer> {
        let mut customers = self.customers.write().await;
        if let Some(existing) = customers.values().find(|c| c.user_id == user_id) {
            return Ok(existing.clone());
        }

        let customer = Customer::for_user(user_id);
        customers.insert(customer.id, customer.clone());

        tracing::info!(customer_id = %customer.id, user_id = %user_id, "Created customer on first access");
        Ok(customer)
    }

    async fn update(&self, id: Uuid, input: UpdateCustomer) -> CustomerResult<Customer> {
        let mut customers = self.customers.write().await;
        let customer = customers
            .get_mut(&id)
            .ok_or(CustomerError::NotFound(id))?;
        customer.apply(input);

        tracing::info!(customer_id = %id, "Updated customer");
        Ok(customer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Membership;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let repo = InMemoryCustomerRepository::new();
        let user_id = Uuid::now_v7();

        let first = repo.get_or_create_for_user(user_id).await.unwrap();
        let second = repo.get_or_create_for_user(user_id).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.membership, Membership::Bronze);
        assert_eq!(repo.customers.read().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_access_creates_one_row() {
        let repo = InMemoryCustomerRepository::new();
        let user_id = Uuid::now_v7();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.get_or_create_for_user(user_id).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();

        assert_eq!(ids.len(), 1);
        assert_eq!(repo.customers.read().await.len(), 1);
    }

    #[tokio::test]
    async fn second_profile_for_user_is_rejected() {
        let repo = InMemoryCustomerRepository::new();
        let user_id = Uuid::now_v7();
        repo.create(Customer::for_user(user_id)).await.unwrap();

        let err = repo.create(Customer::for_user(user_id)).await.unwrap_err();
        assert!(matches!(err, CustomerError::AlreadyExists(id) if id == user_id));
    }

    #[tokio::test]
    async fn update_of_missing_customer_fails() {
        let repo = InMemoryCustomerRepository::new();
        let err = repo
            .update(Uuid::now_v7(), UpdateCustomer::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::NotFound(_)));
    }
}
