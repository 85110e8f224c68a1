//! Credential hashing port and its Argon2 adapter

use invoicing_security::PasswordService;

use crate::domain::User;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash_password(&self, user: &User, plaintext: &str) -> Result<String, DomainError>;
    fn verify_password(&self, user: &User, plaintext: &str) -> Result<bool, DomainError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash_password(&self, _user: &User, plaintext: &str) -> Result<String, DomainError> {
        PasswordService::hash(plaintext).map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    fn verify_password(&self, user: &User, plaintext: &str) -> Result<bool, DomainError> {
        let Some(hash) = user.password.hashed() else {
            return Ok(false);
        };
        PasswordService::verify(plaintext, hash).map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }
}
