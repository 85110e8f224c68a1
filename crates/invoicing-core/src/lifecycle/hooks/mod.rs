//! Hooks registered on the write lifecycle

pub mod customer_owner;
pub mod invoice_chrono;
pub mod password_hashing;

pub use customer_owner::CustomerOwnerHook;
pub use invoice_chrono::InvoiceChronoHook;
pub use password_hashing::PasswordHashingHook;
