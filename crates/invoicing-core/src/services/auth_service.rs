// ============================================================================
// Invoicing Core - Authentication Service
// File: crates/invoicing-core/src/services/auth_service.rs
// ============================================================================
//! Login and access-token handling

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use invoicing_security::{JwtError, JwtService};
use invoicing_shared::utils::mask_email;

use crate::domain::{Identity, User};
use crate::error::DomainError;
use crate::lifecycle::CredentialHasher;
use crate::repositories::UserRepository;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>, jwt: Arc<JwtService>) -> Self {
        Self { users, hasher, jwt }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for email: {}", mask_email(email));

        // 1. Find user by email
        let user = self.users.find_by_email(email.trim()).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", mask_email(email));
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        if !self.hasher.verify_password(&user, password)? {
            warn!("Login failed: invalid password for: {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Issue access token
        let access_token = self
            .jwt
            .generate_access_token(&user.id, &user.email, &user.roles())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Login successful for: {}", user.id);

        Ok(LoginResult {
            user,
            access_token,
            expires_in: self.jwt.access_token_expiry(),
        })
    }

    /// Resolves a bearer token into the identity of a user that still exists.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, DomainError> {
        let claims = self.jwt.validate_token(token).map_err(|e| {
            warn!("Rejected access token: {}", e);
            DomainError::Unauthenticated
        })?;
        let id: Uuid = claims.user_id().map_err(|_: JwtError| DomainError::Unauthenticated)?;

        let user = self.users.find_by_id(&id).await?.ok_or_else(|| {
            warn!("Rejected access token: user {} no longer exists", id);
            DomainError::Unauthenticated
        })?;
        Ok(user.to_identity())
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, Password};
    use crate::lifecycle::Argon2Hasher;
    use crate::repositories::MockUserRepository;
    use invoicing_security::PasswordService;

    fn stored_user() -> User {
        let mut user = User::new(NewUser {
            email: "jane@example.com".into(),
            password: "unused".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            company: None,
            street_address: None,
            postcode: None,
            city: None,
            phone_number: None,
        });
        user.password = Password::Hashed(PasswordService::hash("secret-pw").unwrap());
        user
    }

    fn service(users: MockUserRepository) -> AuthService {
        AuthService::new(Arc::new(users), Arc::new(Argon2Hasher), Arc::new(JwtService::new("test-secret", 60)))
    }

    #[tokio::test]
    async fn test_login_issues_token_for_valid_credentials() {
        let user = stored_user();
        let id = user.id;
        let by_id = user.clone();
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |_| Ok(Some(user.clone())));
        users
            .expect_find_by_id()
            .withf(move |requested| *requested == id)
            .returning(move |_| Ok(Some(by_id.clone())));
        let auth = service(users);

        let result = auth.login("jane@example.com", "secret-pw").await.unwrap();
        let identity = auth.authenticate(&result.access_token).await.unwrap();

        assert_eq!(result.expires_in, 60);
        assert_eq!(identity.id, id);
        assert_eq!(identity.roles, vec!["ROLE_USER".to_string()]);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_email() {
        let user = stored_user();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |email| Ok((email == "jane@example.com").then(|| user.clone())));
        let auth = service(users);

        assert!(matches!(auth.login("jane@example.com", "wrong-pw").await, Err(DomainError::InvalidCredentials)));
        assert!(matches!(auth.login("nobody@example.com", "secret-pw").await, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage() {
        let auth = service(MockUserRepository::new());
        assert!(matches!(auth.authenticate("not-a-jwt").await, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_token_of_deleted_user_is_rejected() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));
        let auth = service(users);
        let token = JwtService::new("test-secret", 60)
            .generate_access_token(&Uuid::new_v4(), "gone@example.com", &["ROLE_USER".to_string()])
            .unwrap();

        assert!(matches!(auth.authenticate(&token).await, Err(DomainError::Unauthenticated)));
    }
}
