//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use invoicing_shared::Pagination;
use crate::domain::User;
use crate::error::DomainError;

/// Implementations enforce email uniqueness (case-insensitive) and reject
/// users whose password is not hashed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, DomainError>;
    async fn create(&self, user: &User) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
