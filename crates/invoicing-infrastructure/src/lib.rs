//! # Invoicing Infrastructure
//! 
//! Database implementations (adapters) of the core repository ports.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgCustomerRepository, PgInvoiceRepository, PgUserRepository};
pub use memory::InMemoryStore;
