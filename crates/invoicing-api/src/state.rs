//! Shared application state

use std::sync::Arc;

use invoicing_core::lifecycle::{standard_pipeline, Argon2Hasher, CredentialHasher};
use invoicing_core::repositories::{CustomerRepository, InvoiceRepository, UserRepository};
use invoicing_core::services::{AuthService, CustomerService, InvoiceService, UserService, WriteService};
use invoicing_security::JwtService;

/// Repository implementations backing the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub customers: Arc<CustomerService>,
    pub invoices: Arc<InvoiceService>,
}

impl AppState {
    /// Wires the services and the write lifecycle over `repos`.
    pub fn new(repos: Repositories, jwt: JwtService) -> Self {
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher);
        let pipeline = Arc::new(standard_pipeline(hasher.clone(), repos.invoices.clone()));
        let writer = Arc::new(WriteService::new(
            repos.users.clone(),
            repos.customers.clone(),
            repos.invoices.clone(),
            pipeline,
        ));

        Self {
            auth: Arc::new(AuthService::new(repos.users.clone(), hasher, Arc::new(jwt))),
            users: Arc::new(UserService::new(repos.users.clone(), writer.clone())),
            customers: Arc::new(CustomerService::new(
                repos.customers.clone(),
                repos.invoices.clone(),
                repos.users.clone(),
                writer.clone(),
            )),
            invoices: Arc::new(InvoiceService::new(repos.invoices, repos.customers, repos.users, writer)),
        }
    }
}
