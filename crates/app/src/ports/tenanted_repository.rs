//! Tenanted repository port: persistence for models partitioned by tenant.

use std::future::Future;
use std::sync::Arc;

use hexkit_domain::error::Outcome;
use hexkit_domain::model::TenantedModel;
use hexkit_domain::page::{ListFilter, Page};
use tokio_util::sync::CancellationToken;

/// Repository for persisting and querying models scoped to a tenant.
///
/// Every operation takes the tenant the caller acts for; models of other
/// tenants must stay invisible to it.
pub trait TenantedModelRepository<M: TenantedModel>: Send + Sync {
    /// Produce the identifier for the next model created under `tenant`.
    fn next_id(
        &self,
        tenant: &M::TenantId,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M::Id>> + Send;

    /// Persist a model whose identifier has already been assigned.
    fn insert(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send;

    /// Get a model of `tenant` by its identifier.
    fn get(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send;

    /// Replace an existing model of `tenant`.
    fn update(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send;

    /// Delete a model of `tenant` by its identifier.
    fn delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send;

    /// Assign a fresh identifier to `model` and persist it under `tenant`.
    ///
    /// When identifier generation fails its failure is returned and nothing
    /// is persisted.
    fn create(
        &self,
        tenant: &M::TenantId,
        mut model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        async move {
            let id = self.next_id(tenant, cancel).await?;
            model.assign_id(id);
            self.insert(tenant, model, cancel).await
        }
    }
}

/// Paginated listing of a tenant's models.
pub trait TenantedModelListing<M: TenantedModel, F: ListFilter>: Send + Sync {
    /// List the page of `tenant`'s models selected by `filter`.
    fn list(
        &self,
        tenant: &M::TenantId,
        filter: &F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<M>>> + Send;
}

impl<M: TenantedModel, T: TenantedModelRepository<M>> TenantedModelRepository<M> for Arc<T> {
    fn next_id(
        &self,
        tenant: &M::TenantId,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M::Id>> + Send {
        (**self).next_id(tenant, cancel)
    }

    fn insert(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).insert(tenant, model, cancel)
    }

    fn get(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).get(tenant, id, cancel)
    }

    fn update(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).update(tenant, model, cancel)
    }

    fn delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).delete(tenant, id, cancel)
    }

    fn create(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).create(tenant, model, cancel)
    }
}

impl<M: TenantedModel, F: ListFilter, T: TenantedModelListing<M, F>> TenantedModelListing<M, F>
    for Arc<T>
{
    fn list(
        &self,
        tenant: &M::TenantId,
        filter: &F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<M>>> + Send {
        (**self).list(tenant, filter, cancel)
    }
}
