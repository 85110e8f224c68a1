//! Request and response shapes (serialization groups)

pub mod auth;
pub mod customers;
pub mod invoices;
pub mod users;

pub use auth::{LoginRequest, LoginResponse};
pub use customers::{CustomerRead, CustomerSummary};
pub use invoices::{InvoiceRead, InvoiceSubresource};
pub use users::{UserRead, UserSummary};
