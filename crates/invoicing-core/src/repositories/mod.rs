//! Repository traits (ports)

pub mod user_repository;
pub mod customer_repository;
pub mod invoice_repository;

pub use user_repository::UserRepository;
pub use customer_repository::CustomerRepository;
pub use invoice_repository::InvoiceRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
