//! PostgreSQL repository implementations

pub mod customer_repo_impl;
pub mod invoice_repo_impl;
pub mod user_repo_impl;

pub use customer_repo_impl::PgCustomerRepository;
pub use invoice_repo_impl::PgInvoiceRepository;
pub use user_repo_impl::PgUserRepository;

use invoicing_core::error::DomainError;
use tracing::error;

/// Maps a driver error, turning unique violations on the user email index
/// into `EmailAlreadyExists`.
pub(crate) fn map_write_error(context: &str, email: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => DomainError::EmailAlreadyExists(email.to_string()),
        _ => DomainError::DatabaseError(e.to_string()),
    }
}
