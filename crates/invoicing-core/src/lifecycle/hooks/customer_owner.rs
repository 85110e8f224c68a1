//! Stamps the authenticated user as owner of a customer being created

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Resource;
use crate::error::DomainError;
use crate::lifecycle::context::{IdentityProvider, RequestContext};
use crate::lifecycle::pipeline::LifecycleHook;

/// Runs at `Stage::PreValidate`.
#[derive(Debug, Default)]
pub struct CustomerOwnerHook;

#[async_trait]
impl LifecycleHook for CustomerOwnerHook {
    fn name(&self) -> &'static str {
        "customer_owner"
    }

    async fn handle(&self, resource: Option<&mut Resource>, ctx: &RequestContext) -> Result<(), DomainError> {
        let Some(Resource::Customer(customer)) = resource else {
            return Ok(());
        };
        if !ctx.method().is_creation() {
            return Ok(());
        }

        customer.user_id = ctx.current_identity().map(|identity| identity.id);
        debug!(customer_id = %customer.id, owner = ?customer.user_id, "Customer owner assigned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Customer, Identity, NewCustomer, NewUser, User};
    use crate::lifecycle::context::HttpMethod;
    use uuid::Uuid;

    fn customer() -> Customer {
        Customer::new(NewCustomer {
            first_name: "Paul".into(),
            last_name: "Martin".into(),
            email: "paul@example.com".into(),
            company: None,
        })
    }

    fn identity() -> Identity {
        Identity { id: Uuid::new_v4(), email: "owner@example.com".into(), roles: vec!["ROLE_USER".into()] }
    }

    #[tokio::test]
    async fn test_post_assigns_authenticated_owner() {
        let owner = identity();
        let mut resource = Resource::Customer(customer());
        let ctx = RequestContext::authenticated(HttpMethod::Post, owner.clone());

        CustomerOwnerHook.handle(Some(&mut resource), &ctx).await.unwrap();

        let customer = resource.into_customer().unwrap();
        assert_eq!(customer.user_id, Some(owner.id));
    }

    #[tokio::test]
    async fn test_post_without_identity_leaves_customer_unowned() {
        let mut resource = Resource::Customer(customer());
        let ctx = RequestContext::anonymous(HttpMethod::Post);

        CustomerOwnerHook.handle(Some(&mut resource), &ctx).await.unwrap();

        assert_eq!(resource.into_customer().unwrap().user_id, None);
    }

    #[tokio::test]
    async fn test_other_methods_are_no_ops() {
        let previous_owner = Uuid::new_v4();
        for method in [HttpMethod::Get, HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
            let mut c = customer();
            c.user_id = Some(previous_owner);
            let mut resource = Resource::Customer(c);
            let ctx = RequestContext::authenticated(method, identity());

            CustomerOwnerHook.handle(Some(&mut resource), &ctx).await.unwrap();

            assert_eq!(resource.into_customer().unwrap().user_id, Some(previous_owner));
        }
    }

    #[tokio::test]
    async fn test_other_resources_are_untouched() {
        let user = User::new(NewUser {
            email: "jane@example.com".into(),
            password: "secret-pw".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            company: None,
            street_address: None,
            postcode: None,
            city: None,
            phone_number: None,
        });
        let mut resource = Resource::User(user.clone());
        let ctx = RequestContext::authenticated(HttpMethod::Post, identity());

        CustomerOwnerHook.handle(Some(&mut resource), &ctx).await.unwrap();
        CustomerOwnerHook.handle(None, &ctx).await.unwrap();

        let after = resource.into_user().unwrap();
        assert_eq!(after.id, user.id);
        assert!(after.customer_ids.is_empty());
    }
}
