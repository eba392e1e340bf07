//! Application services: the create/update/delete templates.
//!
//! Each service struct accepts port trait implementations via generic
//! parameters (constructor injection) plus a hooks strategy, keeping this
//! layer decoupled from concrete adapters.

pub mod config;
pub mod hooks;
pub mod model_service;
pub mod tenanted_model_service;

#[cfg(test)]
mod testing;

pub use config::{ChangeHookPolicy, ServiceConfig};
pub use hooks::{Change, ModelHooks, NoHooks, TenantedModelHooks};
pub use model_service::ModelService;
pub use tenanted_model_service::TenantedModelService;

use hexkit_domain::error::Failure;

/// Log a failure that ends the pipeline at `step`.
fn short_circuit(step: &'static str) -> impl Fn(&Failure) {
    move |err| {
        tracing::debug!(
            step,
            status = %err.status(),
            error = %err,
            "operation short-circuited"
        )
    }
}
