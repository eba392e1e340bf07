//! Inbound ports: what transport layers call.
//!
//! The service templates implement these traits, so controllers can hold a
//! `impl ModelManagement<M>` without naming the service's repository and
//! hook types.

use std::future::Future;

use hexkit_domain::error::Outcome;
use hexkit_domain::model::{Model, TenantedModel};
use tokio_util::sync::CancellationToken;

/// Create/update/delete use-cases for a non-tenanted model.
pub trait ModelManagement<M: Model>: Send + Sync {
    /// Create a model; the returned model carries its assigned identifier.
    fn create(&self, model: M, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<M>> + Send;

    /// Update an existing model.
    fn update(&self, model: M, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<M>> + Send;

    /// Delete a model. Deleting an absent model succeeds.
    fn delete(&self, id: &M::Id, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<()>> + Send;

    /// Look up a model by identifier.
    fn get(&self, id: &M::Id, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<M>> + Send;
}

/// Create/update/delete use-cases for a model scoped to a tenant.
pub trait TenantedModelManagement<M: TenantedModel>: Send + Sync {
    /// Create a model under `tenant`.
    fn create(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send;

    /// Update a model of `tenant`.
    fn update(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send;

    /// Delete a model of `tenant`. Deleting an absent model succeeds.
    fn delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send;

    /// Look up a model of `tenant` by identifier.
    fn get(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send;
}
