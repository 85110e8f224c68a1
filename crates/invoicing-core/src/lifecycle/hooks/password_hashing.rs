//! Replaces a new user's plaintext password with its hash

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Password, Resource};
use crate::error::DomainError;
use crate::lifecycle::context::RequestContext;
use crate::lifecycle::hasher::CredentialHasher;
use crate::lifecycle::pipeline::LifecycleHook;

/// Runs at `Stage::PreWrite`: validation has seen the plaintext, storage
/// only ever sees the hash.
pub struct PasswordHashingHook {
    hasher: Arc<dyn CredentialHasher>,
}

impl PasswordHashingHook {
    pub fn new(hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { hasher }
    }
}

#[async_trait]
impl LifecycleHook for PasswordHashingHook {
    fn name(&self) -> &'static str {
        "password_hashing"
    }

    async fn handle(&self, resource: Option<&mut Resource>, ctx: &RequestContext) -> Result<(), DomainError> {
        let Some(Resource::User(user)) = resource else {
            return Ok(());
        };
        if !ctx.method().is_creation() {
            return Ok(());
        }
        let Password::Plain(plain) = &user.password else {
            return Ok(());
        };

        let hash = self.hasher.hash_password(user, plain)?;
        user.password = Password::Hashed(hash);
        debug!(user_id = %user.id, "Password hashed");
        Ok(())
    }
}
