//! `users_read` group and the owner summary embedded in other resources

use serde::Serialize;
use uuid::Uuid;

use invoicing_core::domain::User;

/// Public view of a user. City and password are never exposed.
#[derive(Debug, Serialize)]
pub struct UserRead {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub street_address: Option<String>,
    pub postcode: Option<String>,
    pub phone_number: Option<String>,
}

impl From<&User> for UserRead {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            company: user.company.clone(),
            street_address: user.street_address.clone(),
            postcode: user.postcode.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
