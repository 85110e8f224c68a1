//! Invoice repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use invoicing_shared::Pagination;
use crate::domain::Invoice;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Invoice>, DomainError>;
    /// Invoices of every customer owned by `user_id`.
    async fn list_by_user(&self, user_id: &Uuid, pagination: Pagination) -> Result<Vec<Invoice>, DomainError>;
    async fn list_by_customer(&self, customer_id: &Uuid) -> Result<Vec<Invoice>, DomainError>;
    /// Highest `chrono` in the sequence `customer_id` numbers into: its
    /// owner's invoices, or the customer's own while it has no owner.
    async fn last_chrono_in_sequence(&self, customer_id: &Uuid) -> Result<Option<i32>, DomainError>;
    /// Stores the invoice as the next `chrono` of its sequence. Allocation
    /// and insert are atomic; the returned invoice carries the stored number.
    async fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError>;
    async fn update(&self, invoice: &Invoice) -> Result<Invoice, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
