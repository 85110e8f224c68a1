//! Write-request payload after deserialization

use uuid::Uuid;
use validator::Validate;

use super::{Customer, Invoice, User};

/// Entity travelling through one write request.
#[derive(Debug, Clone)]
pub enum Resource {
    User(User),
    Customer(Customer),
    Invoice(Invoice),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::User(_) => "user",
            Resource::Customer(_) => "customer",
            Resource::Invoice(_) => "invoice",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Resource::User(u) => u.id,
            Resource::Customer(c) => c.id,
            Resource::Invoice(i) => i.id,
        }
    }

    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            Resource::User(u) => u.validate(),
            Resource::Customer(c) => c.validate(),
            Resource::Invoice(i) => i.validate(),
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            Resource::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn into_customer(self) -> Option<Customer> {
        match self {
            Resource::Customer(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_invoice(self) -> Option<Invoice> {
        match self {
            Resource::Invoice(i) => Some(i),
            _ => None,
        }
    }
}
