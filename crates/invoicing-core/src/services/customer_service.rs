// ============================================================================
// Invoicing Core - Customer Service
// File: crates/invoicing-core/src/services/customer_service.rs
// ============================================================================
//! Customers of the authenticated user

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use invoicing_shared::Pagination;

use crate::domain::{Customer, CustomerPatch, Invoice, NewCustomer, Resource, User};
use crate::error::DomainError;
use crate::lifecycle::{HttpMethod, RequestContext};
use crate::repositories::{CustomerRepository, InvoiceRepository, UserRepository};

use super::access::ensure_owner;
use super::write_service::WriteService;

/// Customer with its owner and invoices loaded.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub customer: Customer,
    pub owner: Option<User>,
    pub invoices: Vec<Invoice>,
}

impl CustomerDetails {
    pub fn total_amount(&self) -> Decimal {
        self.invoices.iter().map(|i| i.amount).sum()
    }

    pub fn unpaid_amount(&self) -> Decimal {
        self.invoices.iter().filter(|i| i.is_outstanding()).map(|i| i.amount).sum()
    }
}

pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    users: Arc<dyn UserRepository>,
    writer: Arc<WriteService>,
}

impl CustomerService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        users: Arc<dyn UserRepository>,
        writer: Arc<WriteService>,
    ) -> Self {
        Self { customers, invoices, users, writer }
    }

    /// Creates a customer owned by the caller. The owner is assigned by the
    /// lifecycle, so an anonymous context yields an unowned customer.
    pub async fn create(&self, input: NewCustomer, ctx: &RequestContext) -> Result<Customer, DomainError> {
        let customer = self
            .writer
            .write(Resource::Customer(Customer::new(input)), &ctx.with_method(HttpMethod::Post))
            .await?
            .into_customer()
            .ok_or_else(|| DomainError::InternalError("write returned another resource".into()))?;
        info!(customer_id = %customer.id, owner = ?customer.user_id, "Customer created");
        Ok(customer)
    }

    /// Loads a customer the caller owns.
    pub async fn find_owned(&self, id: &Uuid, ctx: &RequestContext) -> Result<Customer, DomainError> {
        let identity = ctx.require_identity()?;
        let customer = self.customers.find_by_id(id).await?.ok_or(DomainError::CustomerNotFound(*id))?;
        ensure_owner(identity, &customer)?;
        Ok(customer)
    }

    pub async fn get(&self, id: &Uuid, ctx: &RequestContext) -> Result<CustomerDetails, DomainError> {
        let customer = self.find_owned(id, ctx).await?;
        self.details(customer).await
    }

    pub async fn list(&self, ctx: &RequestContext, pagination: Pagination) -> Result<Vec<CustomerDetails>, DomainError> {
        let identity = ctx.require_identity()?;
        let customers = self.customers.list_by_user(&identity.id, pagination).await?;
        let mut result = Vec::with_capacity(customers.len());
        for customer in customers {
            result.push(self.details(customer).await?);
        }
        Ok(result)
    }

    pub async fn update(&self, id: &Uuid, patch: CustomerPatch, ctx: &RequestContext) -> Result<Customer, DomainError> {
        let mut customer = self.find_owned(id, ctx).await?;
        customer.apply_patch(patch);
        self.writer
            .write(Resource::Customer(customer), &ctx.with_method(HttpMethod::Put))
            .await?
            .into_customer()
            .ok_or_else(|| DomainError::InternalError("write returned another resource".into()))
    }

    pub async fn delete(&self, id: &Uuid, ctx: &RequestContext) -> Result<(), DomainError> {
        self.find_owned(id, ctx).await?;
        self.customers.delete(id).await?;
        info!(customer_id = %id, "Customer deleted");
        Ok(())
    }

    /// Invoices of one customer the caller owns.
    pub async fn invoices(&self, id: &Uuid, ctx: &RequestContext) -> Result<Vec<Invoice>, DomainError> {
        self.find_owned(id, ctx).await?;
        self.invoices.list_by_customer(id).await
    }

    async fn details(&self, customer: Customer) -> Result<CustomerDetails, DomainError> {
        let owner = match customer.user_id {
            Some(user_id) => self.users.find_by_id(&user_id).await?,
            None => None,
        };
        let invoices = self.invoices.list_by_customer(&customer.id).await?;
        Ok(CustomerDetails { customer, owner, invoices })
    }
}
