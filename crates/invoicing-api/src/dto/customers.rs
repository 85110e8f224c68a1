//! `customers_read` group

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use invoicing_core::domain::{Customer, User};
use invoicing_core::services::CustomerDetails;

use super::users::UserSummary;

#[derive(Debug, Serialize)]
pub struct CustomerRead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
    pub user: Option<UserSummary>,
    pub invoice_count: usize,
    pub total_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&CustomerDetails> for CustomerRead {
    fn from(details: &CustomerDetails) -> Self {
        let customer = &details.customer;
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            company: customer.company.clone(),
            user: details.owner.as_ref().map(UserSummary::from),
            invoice_count: details.invoices.len(),
            total_amount: details.total_amount(),
            unpaid_amount: details.unpaid_amount(),
            created_at: customer.created_at,
        }
    }
}

/// Customer as embedded in an invoice.
#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
    pub user: Option<UserSummary>,
}

impl CustomerSummary {
    pub fn new(customer: &Customer, owner: Option<&User>) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            company: customer.company.clone(),
            user: owner.map(UserSummary::from),
        }
    }
}
