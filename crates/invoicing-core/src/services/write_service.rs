// ============================================================================
// Invoicing Core - Write Service
// File: crates/invoicing-core/src/services/write_service.rs
// ============================================================================
//! Single write path for every resource: pre-validate hooks, validation,
//! pre-write hooks, persistence.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::Resource;
use crate::error::DomainError;
use crate::lifecycle::{HttpMethod, LifecyclePipeline, RequestContext, Stage};
use crate::repositories::{CustomerRepository, InvoiceRepository, UserRepository};

pub struct WriteService {
    users: Arc<dyn UserRepository>,
    customers: Arc<dyn CustomerRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    pipeline: Arc<LifecyclePipeline>,
}

impl WriteService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        customers: Arc<dyn CustomerRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        pipeline: Arc<LifecyclePipeline>,
    ) -> Self {
        Self { users, customers, invoices, pipeline }
    }

    /// Runs the lifecycle for `resource` and persists it: POST creates,
    /// PUT/PATCH update. Nothing is persisted when any step fails.
    pub async fn write(&self, mut resource: Resource, ctx: &RequestContext) -> Result<Resource, DomainError> {
        let method = ctx.method();

        self.pipeline.dispatch(Stage::PreValidate, Some(&mut resource), ctx).await?;

        if let Err(errors) = resource.validate() {
            warn!(resource = resource.kind(), method = method.as_str(), "Validation failed: {}", errors);
            return Err(errors.into());
        }

        self.pipeline.dispatch(Stage::PreWrite, Some(&mut resource), ctx).await?;

        let persisted = match (method, resource) {
            (HttpMethod::Post, Resource::User(user)) => Resource::User(self.users.create(&user).await?),
            (HttpMethod::Post, Resource::Customer(customer)) => {
                Resource::Customer(self.customers.create(&customer).await?)
            }
            (HttpMethod::Post, Resource::Invoice(invoice)) => Resource::Invoice(self.invoices.create(&invoice).await?),
            (HttpMethod::Put | HttpMethod::Patch, Resource::User(user)) => {
                Resource::User(self.users.update(&user).await?)
            }
            (HttpMethod::Put | HttpMethod::Patch, Resource::Customer(customer)) => {
                Resource::Customer(self.customers.update(&customer).await?)
            }
            (HttpMethod::Put | HttpMethod::Patch, Resource::Invoice(invoice)) => {
                Resource::Invoice(self.invoices.update(&invoice).await?)
            }
            (method, resource) => {
                return Err(DomainError::MethodNotAllowed {
                    method: method.as_str().to_string(),
                    resource: resource.kind(),
                })
            }
        };

        info!(resource = persisted.kind(), id = %persisted.id(), method = method.as_str(), "Resource persisted");
        Ok(persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Customer, Identity, NewCustomer, NewUser, Password, User};
    use crate::lifecycle::hasher::MockCredentialHasher;
    use crate::lifecycle::standard_pipeline;
    use crate::repositories::{MockCustomerRepository, MockInvoiceRepository, MockUserRepository};
    use uuid::Uuid;

    fn new_user(password: &str) -> User {
        User::new(NewUser {
            email: "jane@example.com".into(),
            password: password.into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            company: None,
            street_address: None,
            postcode: None,
            city: None,
            phone_number: None,
        })
    }

    fn new_customer() -> Customer {
        Customer::new(NewCustomer {
            first_name: "Paul".into(),
            last_name: "Martin".into(),
            email: "paul@example.com".into(),
            company: None,
        })
    }

    fn service(
        users: MockUserRepository,
        customers: MockCustomerRepository,
        hasher: MockCredentialHasher,
    ) -> WriteService {
        let invoices: Arc<dyn InvoiceRepository> = Arc::new(MockInvoiceRepository::new());
        let pipeline = standard_pipeline(Arc::new(hasher), invoices.clone());
        WriteService::new(Arc::new(users), Arc::new(customers), invoices, Arc::new(pipeline))
    }

    #[tokio::test]
    async fn test_user_creation_validates_plaintext_and_persists_hash() {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash_password()
            .times(1)
            .returning(|_, plain| Ok(format!("hashed:{}", plain)));
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|u| u.password == Password::Hashed("hashed:secret-pw".into()))
            .times(1)
            .returning(|u| Ok(u.clone()));

        let svc = service(users, MockCustomerRepository::new(), hasher);
        let persisted = svc
            .write(Resource::User(new_user("secret-pw")), &RequestContext::anonymous(HttpMethod::Post))
            .await
            .unwrap()
            .into_user()
            .unwrap();

        assert_eq!(persisted.password.hashed(), Some("hashed:secret-pw"));
    }

    #[tokio::test]
    async fn test_short_password_fails_before_hashing_and_persistence() {
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash_password().never();
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let svc = service(users, MockCustomerRepository::new(), hasher);
        let result = svc
            .write(Resource::User(new_user("abc")), &RequestContext::anonymous(HttpMethod::Post))
            .await;

        match result {
            Err(DomainError::Validation(errors)) => assert!(errors.field_errors().contains_key("password")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hash_failure_persists_nothing() {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash_password()
            .returning(|_, _| Err(DomainError::PasswordHashError("unsupported".into())));
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let svc = service(users, MockCustomerRepository::new(), hasher);
        let result = svc
            .write(Resource::User(new_user("secret-pw")), &RequestContext::anonymous(HttpMethod::Post))
            .await;

        assert!(matches!(result, Err(DomainError::PasswordHashError(_))));
    }

    #[tokio::test]
    async fn test_customer_creation_is_stamped_with_caller() {
        let owner = Uuid::new_v4();
        let mut customers = MockCustomerRepository::new();
        customers
            .expect_create()
            .withf(move |c| c.user_id == Some(owner))
            .times(1)
            .returning(|c| Ok(c.clone()));

        let svc = service(MockUserRepository::new(), customers, MockCredentialHasher::new());
        let ctx = RequestContext::authenticated(
            HttpMethod::Post,
            Identity { id: owner, email: "o@example.com".into(), roles: vec![] },
        );
        let customer = svc.write(Resource::Customer(new_customer()), &ctx).await.unwrap().into_customer().unwrap();

        assert_eq!(customer.user_id, Some(owner));
    }

    #[tokio::test]
    async fn test_put_updates_without_rehashing() {
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash_password().never();
        let mut users = MockUserRepository::new();
        users.expect_create().never();
        users.expect_update().times(1).returning(|u| Ok(u.clone()));

        let mut user = new_user("ignored");
        user.password = Password::Hashed("$argon2id$stored".into());

        let svc = service(users, MockCustomerRepository::new(), hasher);
        let updated = svc
            .write(Resource::User(user), &RequestContext::anonymous(HttpMethod::Put))
            .await
            .unwrap()
            .into_user()
            .unwrap();

        assert_eq!(updated.password.hashed(), Some("$argon2id$stored"));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_rejected() {
        let svc = service(MockUserRepository::new(), MockCustomerRepository::new(), MockCredentialHasher::new());
        let result = svc
            .write(Resource::Customer(new_customer()), &RequestContext::anonymous(HttpMethod::Delete))
            .await;

        assert!(matches!(result, Err(DomainError::MethodNotAllowed { resource: "customer", .. })));
    }
}
