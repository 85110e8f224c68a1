//! Write-request lifecycle: context, hook pipeline, and the registered hooks.

pub mod context;
pub mod hasher;
pub mod hooks;
pub mod pipeline;

use std::sync::Arc;

pub use context::{HttpMethod, IdentityProvider, RequestContext};
pub use hasher::{Argon2Hasher, CredentialHasher};
pub use pipeline::{LifecycleHook, LifecyclePipeline, Stage};

use crate::repositories::InvoiceRepository;
use hooks::{CustomerOwnerHook, InvoiceChronoHook, PasswordHashingHook};

pub const CUSTOMER_OWNER_PRIORITY: i32 = 10;
pub const INVOICE_CHRONO_PRIORITY: i32 = 0;
pub const PASSWORD_HASHING_PRIORITY: i32 = 0;

/// Pipeline with the application's hooks registered.
pub fn standard_pipeline(
    hasher: Arc<dyn CredentialHasher>,
    invoices: Arc<dyn InvoiceRepository>,
) -> LifecyclePipeline {
    let mut pipeline = LifecyclePipeline::new();
    pipeline
        .register(Stage::PreValidate, CUSTOMER_OWNER_PRIORITY, Arc::new(CustomerOwnerHook))
        .register(Stage::PreValidate, INVOICE_CHRONO_PRIORITY, Arc::new(InvoiceChronoHook::new(invoices)))
        .register(Stage::PreWrite, PASSWORD_HASHING_PRIORITY, Arc::new(PasswordHashingHook::new(hasher)));
    pipeline
}
