use serde::{Deserialize, Serialize};

use invoicing_core::services::LoginResult;

use super::users::UserRead;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserRead,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: UserRead::from(&result.user),
            token: result.access_token,
            token_type: "Bearer",
            expires_in: result.expires_in,
        }
    }
}
