//! Ownership checks shared by the resource services

use uuid::Uuid;

use crate::domain::{Customer, Identity};
use crate::error::DomainError;

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

pub(crate) fn ensure_self(identity: &Identity, user_id: &Uuid) -> Result<(), DomainError> {
    if identity.id == *user_id || identity.has_role(ROLE_ADMIN) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!("user {} cannot modify user {}", identity.id, user_id)))
    }
}

pub(crate) fn ensure_owner(identity: &Identity, customer: &Customer) -> Result<(), DomainError> {
    if customer.is_owned_by(&identity.id) || identity.has_role(ROLE_ADMIN) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!("customer {} belongs to another user", customer.id)))
    }
}
