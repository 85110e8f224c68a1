// ============================================================================
// Invoicing Core - User Entity
// File: crates/invoicing-core/src/domain/user.rs
// Description: Account owning customers, with its credential
// ============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use invoicing_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, ROLE_USER};

use super::customer::Customer;
use super::identity::Identity;

/// Stored credential. Only `Hashed` may reach the persistence layer.
#[derive(Clone, PartialEq, Eq)]
pub enum Password {
    Plain(String),
    Hashed(String),
}

impl Password {
    pub fn is_hashed(&self) -> bool {
        matches!(self, Password::Hashed(_))
    }

    pub fn hashed(&self) -> Option<&str> {
        match self {
            Password::Hashed(h) => Some(h),
            Password::Plain(_) => None,
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Password::Plain(_) => f.write_str("Plain(***)"),
            Password::Hashed(_) => f.write_str("Hashed(***)"),
        }
    }
}

/// Always redacted; validation reports attach the field value as a param.
impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

fn validate_password(password: &Password) -> Result<(), ValidationError> {
    let Password::Plain(plain) = password else {
        return Ok(());
    };
    if plain.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Password is required".into()));
    }
    let len = plain.chars().count() as u64;
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("length").with_message(
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH).into(),
        ));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new("length").with_message(
            format!("Password must be at most {} characters", MAX_PASSWORD_LENGTH).into(),
        ));
    }
    Ok(())
}

/// User entity
#[derive(Debug, Clone, Serialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,

    /// Stored roles; see [`User::roles`] for the effective set.
    pub roles: Vec<String>,

    #[serde(skip_serializing)]
    #[validate(custom(function = "validate_password"))]
    pub password: Password,

    #[validate(length(min = 2, max = 100, message = "First name must be between 2 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100, message = "Last name must be between 2 and 100 characters"))]
    pub last_name: String,

    #[validate(length(max = 255, message = "Company too long"))]
    pub company: Option<String>,
    #[validate(length(max = 255, message = "Street address too long"))]
    pub street_address: Option<String>,
    #[validate(length(max = 255, message = "Postcode too long"))]
    pub postcode: Option<String>,
    #[validate(length(max = 255, message = "City too long"))]
    pub city: Option<String>,
    #[validate(length(max = 255, message = "Phone number too long"))]
    pub phone_number: Option<String>,

    /// Ids of owned customers, loaded by the repository.
    #[serde(skip)]
    pub customer_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Profile update payload. The password is not updatable through it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub street_address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl User {
    /// Builds an unvalidated user holding the plaintext password.
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: input.email.trim().to_lowercase(),
            roles: Vec::new(),
            password: Password::Plain(input.password),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            company: clean(input.company),
            street_address: clean(input.street_address),
            postcode: clean(input.postcode),
            city: clean(input.city),
            phone_number: clean(input.phone_number),
            customer_ids: Vec::new(),
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    /// Effective roles: stored roles plus `ROLE_USER`, without duplicates.
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::with_capacity(self.roles.len() + 1);
        for role in self.roles.iter().map(String::as_str).chain(std::iter::once(ROLE_USER)) {
            if !roles.iter().any(|r| r == role) {
                roles.push(role.to_string());
            }
        }
        roles
    }

    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            roles: self.roles(),
        }
    }

    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email.trim().to_lowercase();
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if patch.company.is_some() {
            self.company = clean(patch.company);
        }
        if patch.street_address.is_some() {
            self.street_address = clean(patch.street_address);
        }
        if patch.postcode.is_some() {
            self.postcode = clean(patch.postcode);
        }
        if patch.city.is_some() {
            self.city = clean(patch.city);
        }
        if patch.phone_number.is_some() {
            self.phone_number = clean(patch.phone_number);
        }
        self.modified_at = Some(Utc::now());
    }

    pub fn has_customer(&self, customer_id: &Uuid) -> bool {
        self.customer_ids.contains(customer_id)
    }

    /// Adds the customer and points it back at this user. Idempotent.
    pub fn add_customer(&mut self, customer: &mut Customer) {
        if !self.has_customer(&customer.id) {
            self.customer_ids.push(customer.id);
            customer.user_id = Some(self.id);
        }
    }

    /// Removes the customer. Its back-reference is cleared only while it
    /// still points at this user.
    pub fn remove_customer(&mut self, customer: &mut Customer) -> bool {
        let before = self.customer_ids.len();
        self.customer_ids.retain(|id| *id != customer.id);
        let removed = self.customer_ids.len() != before;
        if removed && customer.user_id == Some(self.id) {
            customer.user_id = None;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::NewCustomer;

    fn new_user() -> NewUser {
        NewUser {
            email: " Jane.Doe@Example.com ".to_string(),
            password: "secret-pw".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            company: Some("  ".to_string()),
            street_address: None,
            postcode: None,
            city: Some("Lyon".to_string()),
            phone_number: None,
        }
    }

    fn new_customer() -> Customer {
        Customer::new(NewCustomer {
            first_name: "Paul".to_string(),
            last_name: "Martin".to_string(),
            email: "paul@example.com".to_string(),
            company: None,
        })
    }

    #[test]
    fn test_new_user_normalizes_input() {
        let user = User::new(new_user());
        assert_eq!(user.email, "jane.doe@example.com");
        assert_eq!(user.company, None);
        assert_eq!(user.city.as_deref(), Some("Lyon"));
        assert_eq!(user.password, Password::Plain("secret-pw".to_string()));
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_roles_always_include_role_user() {
        let mut user = User::new(new_user());
        assert_eq!(user.roles(), vec!["ROLE_USER".to_string()]);

        user.roles = vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string(), "ROLE_ADMIN".to_string()];
        assert_eq!(user.roles(), vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()]);
    }

    #[test]
    fn test_short_plain_password_fails_validation() {
        let mut input = new_user();
        input.password = "abc".to_string();
        let errors = User::new(input).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_hashed_password_skips_length_rules() {
        let mut user = User::new(new_user());
        user.password = Password::Hashed("x".repeat(300));
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_and_names() {
        let mut input = new_user();
        input.email = "not-an-email".to_string();
        input.first_name = "J".to_string();
        let errors = User::new(input).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_password_is_never_serialized_or_debug_printed() {
        let user = User::new(new_user());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-pw"));
        assert!(!format!("{:?}", user).contains("secret-pw"));
    }

    #[test]
    fn test_password_serializes_redacted() {
        let plain = serde_json::to_string(&Password::Plain("secret-pw".to_string())).unwrap();
        let hashed = serde_json::to_string(&Password::Hashed("$argon2id$hash".to_string())).unwrap();
        assert_eq!(plain, "\"***\"");
        assert_eq!(hashed, "\"***\"");
    }

    #[test]
    fn test_short_password_report_never_carries_plaintext() {
        let mut input = new_user();
        input.password = "abc".to_string();
        let errors = User::new(input).validate().unwrap_err();
        let report = serde_json::to_string(&errors).unwrap();
        assert!(!report.contains("\"abc\""));
    }

    #[test]
    fn test_to_identity_uses_effective_roles() {
        let user = User::new(new_user());
        let identity = user.to_identity();
        assert_eq!(identity.id, user.id);
        assert_eq!(identity.roles, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn test_add_customer_sets_back_reference_once() {
        let mut user = User::new(new_user());
        let mut customer = new_customer();

        user.add_customer(&mut customer);
        user.add_customer(&mut customer);

        assert_eq!(user.customer_ids, vec![customer.id]);
        assert_eq!(customer.user_id, Some(user.id));
    }

    #[test]
    fn test_remove_customer_clears_back_reference() {
        let mut user = User::new(new_user());
        let mut customer = new_customer();
        user.add_customer(&mut customer);

        assert!(user.remove_customer(&mut customer));
        assert!(user.customer_ids.is_empty());
        assert_eq!(customer.user_id, None);
        assert!(!user.remove_customer(&mut customer));
    }

    #[test]
    fn test_remove_customer_keeps_reassigned_owner() {
        let mut user = User::new(new_user());
        let mut other = User::new(new_user());
        let mut customer = new_customer();
        user.add_customer(&mut customer);

        // Reassigned before the removal reaches the first owner.
        customer.user_id = Some(other.id);
        other.customer_ids.push(customer.id);

        assert!(user.remove_customer(&mut customer));
        assert_eq!(customer.user_id, Some(other.id));
    }

    #[test]
    fn test_apply_patch_keeps_password() {
        let mut user = User::new(new_user());
        user.password = Password::Hashed("$argon2id$hash".to_string());

        user.apply_patch(UserPatch {
            last_name: Some(" Smith ".to_string()),
            company: Some("Acme".to_string()),
            ..Default::default()
        });

        assert_eq!(user.last_name, "Smith");
        assert_eq!(user.company.as_deref(), Some("Acme"));
        assert!(user.password.is_hashed());
        assert!(user.modified_at.is_some());
    }
}
