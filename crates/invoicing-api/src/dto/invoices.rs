//! `invoices_read` and `invoices_subresource` groups

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use invoicing_core::domain::{Invoice, InvoiceStatus};
use invoicing_core::services::InvoiceDetails;

use super::customers::CustomerSummary;

#[derive(Debug, Serialize)]
pub struct InvoiceRead {
    pub id: Uuid,
    pub amount: Decimal,
    pub sent_at: Option<DateTime<Utc>>,
    pub status: InvoiceStatus,
    pub chrono: i32,
    pub customer: CustomerSummary,
}

impl From<&InvoiceDetails> for InvoiceRead {
    fn from(details: &InvoiceDetails) -> Self {
        let invoice = &details.invoice;
        Self {
            id: invoice.id,
            amount: invoice.amount,
            sent_at: invoice.sent_at,
            status: invoice.status,
            chrono: invoice.chrono,
            customer: CustomerSummary::new(&details.customer, details.owner.as_ref()),
        }
    }
}

/// Invoice listed under its customer; no embedded customer.
#[derive(Debug, Serialize)]
pub struct InvoiceSubresource {
    pub id: Uuid,
    pub amount: Decimal,
    pub sent_at: Option<DateTime<Utc>>,
    pub status: InvoiceStatus,
    pub chrono: i32,
}

impl From<&Invoice> for InvoiceSubresource {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            amount: invoice.amount,
            sent_at: invoice.sent_at,
            status: invoice.status,
            chrono: invoice.chrono,
        }
    }
}
