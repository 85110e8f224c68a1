// ============================================================================
// Invoicing Core - Invoice Entity
// File: crates/invoicing-core/src/domain/invoice.rs
// Description: Invoice issued to a customer
// ============================================================================

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::ParseEnumError;

/// Invoice status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Sent,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }

}

impl FromStr for InvoiceStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SENT" => Ok(InvoiceStatus::Sent),
            "PAID" => Ok(InvoiceStatus::Paid),
            "CANCELLED" => Ok(InvoiceStatus::Cancelled),
            _ => Err(ParseEnumError { kind: "invoice status", value: s.to_string() }),
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Sent
    }
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message("Amount must be greater than zero".into()))
    }
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Validate)]
pub struct Invoice {
    pub id: Uuid,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    #[validate(required(message = "Sending date is required"))]
    pub sent_at: Option<DateTime<Utc>>,

    pub status: InvoiceStatus,

    /// Sequential number within the owner's invoices, assigned on creation.
    #[validate(range(min = 1, message = "Invoice number is required"))]
    pub chrono: i32,

    pub customer_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub amount: Decimal,
    pub customer_id: Uuid,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoicePatch {
    pub amount: Option<Decimal>,
    pub sent_at: Option<DateTime<Utc>>,
    pub status: Option<InvoiceStatus>,
}

impl Invoice {
    /// Builds an unnumbered invoice; `chrono` is assigned during the write lifecycle.
    pub fn new(input: NewInvoice) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: input.amount,
            sent_at: input.sent_at,
            status: input.status.unwrap_or_default(),
            chrono: 0,
            customer_id: input.customer_id,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    pub fn apply_patch(&mut self, patch: InvoicePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(sent_at) = patch.sent_at {
            self.sent_at = Some(sent_at);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.modified_at = Some(Utc::now());
    }

    pub fn is_outstanding(&self) -> bool {
        self.status == InvoiceStatus::Sent
    }
}
