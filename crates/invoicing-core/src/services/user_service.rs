//! User registration and profile management

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use invoicing_shared::{utils::mask_email, Pagination};

use crate::domain::{NewUser, Resource, User, UserPatch};
use crate::error::DomainError;
use crate::lifecycle::{HttpMethod, RequestContext};
use crate::repositories::UserRepository;

use super::access::ensure_self;
use super::write_service::WriteService;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    writer: Arc<WriteService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, writer: Arc<WriteService>) -> Self {
        Self { users, writer }
    }

    /// Creates an account. Open to anonymous callers.
    pub async fn register(&self, input: NewUser, ctx: &RequestContext) -> Result<User, DomainError> {
        info!("Registration attempt for email: {}", mask_email(&input.email));
        let user = User::new(input);
        let created = self
            .writer
            .write(Resource::User(user), &ctx.with_method(HttpMethod::Post))
            .await?
            .into_user()
            .ok_or_else(|| DomainError::InternalError("write returned another resource".into()))?;
        info!("Registration successful for: {}", created.id);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<User, DomainError> {
        self.users.find_by_id(id).await?.ok_or(DomainError::UserNotFound(*id))
    }

    pub async fn list(&self, pagination: Pagination) -> Result<Vec<User>, DomainError> {
        self.users.list(pagination).await
    }

    pub async fn update(&self, id: &Uuid, patch: UserPatch, ctx: &RequestContext) -> Result<User, DomainError> {
        ensure_self(ctx.require_identity()?, id)?;
        let mut user = self.get(id).await?;
        user.apply_patch(patch);
        self.writer
            .write(Resource::User(user), &ctx.with_method(HttpMethod::Put))
            .await?
            .into_user()
            .ok_or_else(|| DomainError::InternalError("write returned another resource".into()))
    }

    pub async fn delete(&self, id: &Uuid, ctx: &RequestContext) -> Result<(), DomainError> {
        ensure_self(ctx.require_identity()?, id)?;
        self.get(id).await?;
        self.users.delete(id).await?;
        info!("User deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Password};
    use crate::lifecycle::hasher::MockCredentialHasher;
    use crate::lifecycle::standard_pipeline;
    use crate::repositories::{MockCustomerRepository, MockInvoiceRepository, MockUserRepository};

    fn stored_user(id: Uuid) -> User {
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
        user.id = id;
        user.password = Password::Hashed("$argon2id$stored".into());
        user
    }

    fn service(users: MockUserRepository) -> UserService {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let invoices: Arc<dyn crate::repositories::InvoiceRepository> = Arc::new(MockInvoiceRepository::new());
        let pipeline = standard_pipeline(Arc::new(MockCredentialHasher::new()), invoices.clone());
        let writer = WriteService::new(users.clone(), Arc::new(MockCustomerRepository::new()), invoices, Arc::new(pipeline));
        UserService::new(users, Arc::new(writer))
    }

    fn ctx(id: Uuid) -> RequestContext {
        RequestContext::authenticated(HttpMethod::Put, Identity { id, email: "x@example.com".into(), roles: vec![] })
    }

    #[tokio::test]
    async fn test_update_own_profile() {
        let id = Uuid::new_v4();
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |_| Ok(Some(stored_user(id))));
        users.expect_update().times(1).returning(|u| Ok(u.clone()));

        let updated = service(users)
            .update(&id, UserPatch { city: Some("Nantes".into()), ..Default::default() }, &ctx(id))
            .await
            .unwrap();

        assert_eq!(updated.city.as_deref(), Some("Nantes"));
        assert!(updated.password.is_hashed());
    }

    #[tokio::test]
    async fn test_cannot_update_someone_else() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();
        users.expect_update().never();

        let result = service(users)
            .update(&Uuid::new_v4(), UserPatch::default(), &ctx(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_identity() {
        let mut users = MockUserRepository::new();
        users.expect_delete().never();

        let result = service(users).delete(&Uuid::new_v4(), &RequestContext::anonymous(HttpMethod::Delete)).await;

        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let id = Uuid::new_v4();

        assert!(matches!(service(users).get(&id).await, Err(DomainError::UserNotFound(missing)) if missing == id));
    }
}
