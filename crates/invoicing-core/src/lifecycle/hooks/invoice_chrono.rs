//! Numbers a new invoice within its customer owner's sequence

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::Resource;
use crate::error::DomainError;
use crate::lifecycle::context::{IdentityProvider, RequestContext};
use crate::lifecycle::pipeline::LifecycleHook;
use crate::repositories::InvoiceRepository;

/// Runs at `Stage::PreValidate`. The number set here is the expected one;
/// the repository allocates the stored number when inserting. Without an
/// identity the invoice stays unnumbered and fails validation.
pub struct InvoiceChronoHook {
    invoices: Arc<dyn InvoiceRepository>,
}

impl InvoiceChronoHook {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }
}

#[async_trait]
impl LifecycleHook for InvoiceChronoHook {
    fn name(&self) -> &'static str {
        "invoice_chrono"
    }

    async fn handle(&self, resource: Option<&mut Resource>, ctx: &RequestContext) -> Result<(), DomainError> {
        let Some(Resource::Invoice(invoice)) = resource else {
            return Ok(());
        };
        if !ctx.method().is_creation() {
            return Ok(());
        }
        if ctx.current_identity().is_none() {
            return Ok(());
        }

        let last = self.invoices.last_chrono_in_sequence(&invoice.customer_id).await?;
        invoice.chrono = last.unwrap_or(0) + 1;
        if invoice.sent_at.is_none() {
            invoice.sent_at = Some(Utc::now());
        }
        debug!(invoice_id = %invoice.id, chrono = invoice.chrono, "Invoice numbered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Invoice, NewInvoice};
    use crate::lifecycle::context::HttpMethod;
    use crate::repositories::MockInvoiceRepository;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn invoice() -> Invoice {
        Invoice::new(NewInvoice {
            amount: Decimal::new(1500, 2),
            customer_id: Uuid::new_v4(),
            sent_at: None,
            status: None,
        })
    }

    fn ctx(method: HttpMethod, owner: Uuid) -> RequestContext {
        RequestContext::authenticated(method, Identity { id: owner, email: "o@example.com".into(), roles: vec![] })
    }

    #[tokio::test]
    async fn test_numbers_after_last_invoice_of_customer_sequence() {
        let inv = invoice();
        let customer_id = inv.customer_id;
        let mut repo = MockInvoiceRepository::new();
        repo.expect_last_chrono_in_sequence()
            .withf(move |id| *id == customer_id)
            .times(1)
            .returning(|_| Ok(Some(41)));
        let hook = InvoiceChronoHook::new(Arc::new(repo));
        let mut resource = Resource::Invoice(inv);

        // The caller's own id plays no part in the sequence.
        hook.handle(Some(&mut resource), &ctx(HttpMethod::Post, Uuid::new_v4())).await.unwrap();

        let invoice = resource.into_invoice().unwrap();
        assert_eq!(invoice.chrono, 42);
        assert!(invoice.sent_at.is_some());
    }

    #[tokio::test]
    async fn test_first_invoice_gets_number_one_and_keeps_given_date() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_last_chrono_in_sequence().returning(|_| Ok(None));
        let hook = InvoiceChronoHook::new(Arc::new(repo));
        let sent_at = Utc::now() - chrono::Duration::days(3);
        let mut inv = invoice();
        inv.sent_at = Some(sent_at);
        let mut resource = Resource::Invoice(inv);

        hook.handle(Some(&mut resource), &ctx(HttpMethod::Post, Uuid::new_v4())).await.unwrap();

        let invoice = resource.into_invoice().unwrap();
        assert_eq!(invoice.chrono, 1);
        assert_eq!(invoice.sent_at, Some(sent_at));
    }

    #[tokio::test]
    async fn test_no_op_for_updates_and_anonymous_requests() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_last_chrono_in_sequence().never();
        let hook = InvoiceChronoHook::new(Arc::new(repo));

        let mut resource = Resource::Invoice(invoice());
        hook.handle(Some(&mut resource), &ctx(HttpMethod::Put, Uuid::new_v4())).await.unwrap();
        hook.handle(Some(&mut resource), &RequestContext::anonymous(HttpMethod::Post)).await.unwrap();

        assert_eq!(resource.into_invoice().unwrap().chrono, 0);
    }
}
