// ============================================================================
// Invoicing Core - Write Lifecycle Pipeline
// File: crates/invoicing-core/src/lifecycle/pipeline.rs
// Description: Ordered hooks fired around validation of a write request
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Resource;
use crate::error::DomainError;

use super::context::RequestContext;

/// Point of the write lifecycle at which hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resource built from input, not yet validated.
    PreValidate,
    /// Resource validated, not yet persisted.
    PreWrite,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreValidate => "pre_validate",
            Stage::PreWrite => "pre_write",
        }
    }
}

/// Callback run by the pipeline.
///
/// Hooks check the resource type and the request method themselves and
/// return `Ok(())` untouched when either does not apply. `resource` is `None`
/// when the request produces no object.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, resource: Option<&mut Resource>, ctx: &RequestContext) -> Result<(), DomainError>;
}

struct Registration {
    stage: Stage,
    priority: i32,
    hook: Arc<dyn LifecycleHook>,
}

/// Hooks grouped by stage, higher priority first, ties in registration order.
#[derive(Default)]
pub struct LifecyclePipeline {
    registrations: Vec<Registration>,
}

impl LifecyclePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, stage: Stage, priority: i32, hook: Arc<dyn LifecycleHook>) -> &mut Self {
        self.registrations.push(Registration { stage, priority, hook });
        // Stable: equal priorities keep registration order.
        self.registrations.sort_by(|a, b| b.priority.cmp(&a.priority));
        self
    }

    pub fn hook_names(&self, stage: Stage) -> Vec<&'static str> {
        self.hooks(stage).map(|h| h.name()).collect()
    }

    fn hooks(&self, stage: Stage) -> impl Iterator<Item = &Arc<dyn LifecycleHook>> {
        self.registrations
            .iter()
            .filter(move |r| r.stage == stage)
            .map(|r| &r.hook)
    }

    /// Runs every hook of `stage` against the same resource. The first error
    /// stops the stage and is returned.
    pub async fn dispatch(
        &self,
        stage: Stage,
        mut resource: Option<&mut Resource>,
        ctx: &RequestContext,
    ) -> Result<(), DomainError> {
        for hook in self.hooks(stage) {
            debug!(
                stage = stage.as_str(),
                hook = hook.name(),
                method = ctx.method().as_str(),
                resource = resource.as_deref().map(Resource::kind),
                "Dispatching lifecycle hook"
            );
            hook.handle(resource.as_deref_mut(), ctx).await?;
        }
        Ok(())
    }
}
