//! Invoices issued to the authenticated user's customers

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use invoicing_shared::Pagination;

use crate::domain::{Customer, Invoice, InvoicePatch, NewInvoice, Resource, User};
use crate::error::DomainError;
use crate::lifecycle::{HttpMethod, RequestContext};
use crate::repositories::{CustomerRepository, InvoiceRepository, UserRepository};

use super::access::ensure_owner;
use super::write_service::WriteService;

/// Invoice with its customer and the customer's owner loaded.
#[derive(Debug, Clone)]
pub struct InvoiceDetails {
    pub invoice: Invoice,
    pub customer: Customer,
    pub owner: Option<User>,
}

pub struct InvoiceService {
    invoices: Arc<dyn InvoiceRepository>,
    customers: Arc<dyn CustomerRepository>,
    users: Arc<dyn UserRepository>,
    writer: Arc<WriteService>,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        customers: Arc<dyn CustomerRepository>,
        users: Arc<dyn UserRepository>,
        writer: Arc<WriteService>,
    ) -> Self {
        Self { invoices, customers, users, writer }
    }

    async fn owned_customer(&self, customer_id: &Uuid, ctx: &RequestContext) -> Result<Customer, DomainError> {
        let identity = ctx.require_identity()?;
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or(DomainError::CustomerNotFound(*customer_id))?;
        ensure_owner(identity, &customer)?;
        Ok(customer)
    }

    async fn owned_invoice(&self, id: &Uuid, ctx: &RequestContext) -> Result<(Invoice, Customer), DomainError> {
        let invoice = self.invoices.find_by_id(id).await?.ok_or(DomainError::InvoiceNotFound(*id))?;
        let customer = self.owned_customer(&invoice.customer_id, ctx).await?;
        Ok((invoice, customer))
    }

    /// Issues an invoice to one of the caller's customers.
    pub async fn create(&self, input: NewInvoice, ctx: &RequestContext) -> Result<Invoice, DomainError> {
        self.owned_customer(&input.customer_id, ctx).await?;
        let invoice = self
            .writer
            .write(Resource::Invoice(Invoice::new(input)), &ctx.with_method(HttpMethod::Post))
            .await?
            .into_invoice()
            .ok_or_else(|| DomainError::InternalError("write returned another resource".into()))?;
        info!(invoice_id = %invoice.id, chrono = invoice.chrono, "Invoice created");
        Ok(invoice)
    }

    pub async fn get(&self, id: &Uuid, ctx: &RequestContext) -> Result<InvoiceDetails, DomainError> {
        let (invoice, customer) = self.owned_invoice(id, ctx).await?;
        self.details(invoice, customer).await
    }

    pub async fn list(&self, ctx: &RequestContext, pagination: Pagination) -> Result<Vec<InvoiceDetails>, DomainError> {
        let identity = ctx.require_identity()?;
        let invoices = self.invoices.list_by_user(&identity.id, pagination).await?;
        let mut result = Vec::with_capacity(invoices.len());
        for invoice in invoices {
            let customer = self
                .customers
                .find_by_id(&invoice.customer_id)
                .await?
                .ok_or(DomainError::CustomerNotFound(invoice.customer_id))?;
            result.push(self.details(invoice, customer).await?);
        }
        Ok(result)
    }

    pub async fn update(&self, id: &Uuid, patch: InvoicePatch, ctx: &RequestContext) -> Result<Invoice, DomainError> {
        let (mut invoice, _) = self.owned_invoice(id, ctx).await?;
        invoice.apply_patch(patch);
        self.writer
            .write(Resource::Invoice(invoice), &ctx.with_method(HttpMethod::Put))
            .await?
            .into_invoice()
            .ok_or_else(|| DomainError::InternalError("write returned another resource".into()))
    }

    pub async fn delete(&self, id: &Uuid, ctx: &RequestContext) -> Result<(), DomainError> {
        self.owned_invoice(id, ctx).await?;
        self.invoices.delete(id).await?;
        info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    async fn details(&self, invoice: Invoice, customer: Customer) -> Result<InvoiceDetails, DomainError> {
        let owner = match customer.user_id {
            Some(user_id) => self.users.find_by_id(&user_id).await?,
            None => None,
        };
        Ok(InvoiceDetails { invoice, customer, owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, NewCustomer};
    use crate::lifecycle::hasher::MockCredentialHasher;
    use crate::lifecycle::standard_pipeline;
    use crate::repositories::{MockCustomerRepository, MockInvoiceRepository, MockUserRepository};
    use crate::services::ROLE_ADMIN;
    use rust_decimal::Decimal;

    fn customer_of(owner: Uuid) -> Customer {
        let mut customer = Customer::new(NewCustomer {
            first_name: "Paul".into(),
            last_name: "Martin".into(),
            email: "paul@example.com".into(),
            company: None,
        });
        customer.user_id = Some(owner);
        customer
    }

    fn ctx(owner: Uuid) -> RequestContext {
        RequestContext::authenticated(HttpMethod::Post, Identity { id: owner, email: "o@example.com".into(), roles: vec![] })
    }

    fn service(customers: MockCustomerRepository, invoices: MockInvoiceRepository) -> InvoiceService {
        let customers: Arc<dyn CustomerRepository> = Arc::new(customers);
        let invoices: Arc<dyn InvoiceRepository> = Arc::new(invoices);
        let users: Arc<dyn UserRepository> = Arc::new(MockUserRepository::new());
        let pipeline = standard_pipeline(Arc::new(MockCredentialHasher::new()), invoices.clone());
        let writer = WriteService::new(users.clone(), customers.clone(), invoices.clone(), Arc::new(pipeline));
        InvoiceService::new(invoices, customers, users, Arc::new(writer))
    }

    fn input(customer_id: Uuid) -> NewInvoice {
        NewInvoice { amount: Decimal::new(9_990, 2), customer_id, sent_at: None, status: None }
    }

    #[tokio::test]
    async fn test_create_numbers_invoice_for_own_customer() {
        let owner = Uuid::new_v4();
        let customer = customer_of(owner);
        let customer_id = customer.id;
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_id().returning(move |_| Ok(Some(customer.clone())));
        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_last_chrono_in_sequence()
            .withf(move |id| *id == customer_id)
            .returning(|_| Ok(Some(7)));
        invoices.expect_create().times(1).returning(|i| Ok(i.clone()));

        let invoice = service(customers, invoices).create(input(customer_id), &ctx(owner)).await.unwrap();

        assert_eq!(invoice.chrono, 8);
        assert_eq!(invoice.customer_id, customer_id);
        assert!(invoice.sent_at.is_some());
    }

    #[tokio::test]
    async fn test_admin_invoice_continues_owner_sequence() {
        let customer = customer_of(Uuid::new_v4());
        let customer_id = customer.id;
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_id().returning(move |_| Ok(Some(customer.clone())));
        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_last_chrono_in_sequence()
            .withf(move |id| *id == customer_id)
            .times(1)
            .returning(|_| Ok(Some(3)));
        invoices.expect_create().times(1).returning(|i| Ok(i.clone()));
        let admin = RequestContext::authenticated(
            HttpMethod::Post,
            Identity { id: Uuid::new_v4(), email: "admin@example.com".into(), roles: vec![ROLE_ADMIN.to_string()] },
        );

        let invoice = service(customers, invoices).create(input(customer_id), &admin).await.unwrap();

        assert_eq!(invoice.chrono, 4);
    }

    #[tokio::test]
    async fn test_create_for_foreign_customer_is_forbidden() {
        let customer = customer_of(Uuid::new_v4());
        let customer_id = customer.id;
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_id().returning(move |_| Ok(Some(customer.clone())));
        let mut invoices = MockInvoiceRepository::new();
        invoices.expect_create().never();

        let result = service(customers, invoices).create(input(customer_id), &ctx(Uuid::new_v4())).await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_for_unknown_customer() {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_id().returning(|_| Ok(None));

        let result = service(customers, MockInvoiceRepository::new())
            .create(input(Uuid::new_v4()), &ctx(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(DomainError::CustomerNotFound(_))));
    }
}
