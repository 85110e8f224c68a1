//! # Invoicing Core - Domain Module
//! 
//! Domain entities for the invoicing application.

pub mod user;
pub mod customer;
pub mod invoice;
pub mod identity;
pub mod resource;

// Re-export all entities and enums
pub use user::{User, NewUser, UserPatch, Password};
pub use customer::{Customer, NewCustomer, CustomerPatch};
pub use invoice::{Invoice, NewInvoice, InvoicePatch, InvoiceStatus};
pub use identity::Identity;
pub use resource::Resource;
