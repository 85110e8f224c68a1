//! # Invoicing Core
//! 
//! Domain entities, write lifecycle, services, and repository traits for the
//! invoicing application.

pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
