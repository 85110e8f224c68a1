//! Customer repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use invoicing_shared::Pagination;
use crate::domain::Customer;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError>;
    async fn list_by_user(&self, user_id: &Uuid, pagination: Pagination) -> Result<Vec<Customer>, DomainError>;
    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError>;
    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
