//! Domain services (business logic)

mod access;
pub mod auth_service;
pub mod customer_service;
pub mod invoice_service;
pub mod user_service;
pub mod write_service;

pub use access::ROLE_ADMIN;
pub use auth_service::{AuthService, LoginResult};
pub use customer_service::{CustomerDetails, CustomerService};
pub use invoice_service::{InvoiceDetails, InvoiceService};
pub use user_service::UserService;
pub use write_service::WriteService;
