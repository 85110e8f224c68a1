//! Customer domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct Customer {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "First name must be between 2 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100, message = "Last name must be between 2 and 100 characters"))]
    pub last_name: String,

    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,

    #[validate(length(max = 255, message = "Company too long"))]
    pub company: Option<String>,

    /// Owning user. `None` for customers detached from their owner.
    pub user_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl Customer {
    /// Builds an unowned, unvalidated customer. Ownership is stamped during
    /// the write lifecycle.
    pub fn new(input: NewCustomer) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            company: input.company.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            user_id: None,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    pub fn apply_patch(&mut self, patch: CustomerPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_lowercase();
        }
        if let Some(company) = patch.company {
            let company = company.trim().to_string();
            self.company = (!company.is_empty()).then_some(company);
        }
        self.modified_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewCustomer {
        NewCustomer {
            first_name: "Paul".to_string(),
            last_name: "Martin".to_string(),
            email: "Paul@Example.com".to_string(),
            company: Some(" Acme ".to_string()),
        }
    }

    #[test]
    fn test_new_customer_is_unowned() {
        let customer = Customer::new(input());
        assert_eq!(customer.user_id, None);
        assert_eq!(customer.email, "paul@example.com");
        assert_eq!(customer.company.as_deref(), Some("Acme"));
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let mut bad = input();
        bad.last_name = "M".to_string();
        bad.email = "paul".to_string();
        let errors = Customer::new(bad).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_patch_clears_blank_company() {
        let mut customer = Customer::new(input());
        customer.apply_patch(CustomerPatch {
            company: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(customer.company, None);
        assert_eq!(customer.first_name, "Paul");
    }
}
