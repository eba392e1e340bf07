//! Repository port: persistence for non-tenanted models.

use std::future::Future;
use std::sync::Arc;

use hexkit_domain::error::Outcome;
use hexkit_domain::model::Model;
use hexkit_domain::page::{ListFilter, Page};
use tokio_util::sync::CancellationToken;

/// Repository for persisting and querying models of type `M`.
///
/// Implementors supply identifier generation and the storage primitives;
/// [`create`](Self::create) ties them together so that every model is given
/// a fresh identifier before it is persisted.
pub trait ModelRepository<M: Model>: Send + Sync {
    /// Produce the identifier for the next model to be created.
    fn next_id(&self, cancel: &CancellationToken) -> impl Future<Output = Outcome<M::Id>> + Send;

    /// Persist a model whose identifier has already been assigned.
    fn insert(&self, model: M, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<M>> + Send;

    /// Get a model by its identifier.
    fn get(&self, id: &M::Id, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<M>> + Send;

    /// Replace an existing model.
    fn update(&self, model: M, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<M>> + Send;

    /// Delete a model by its identifier.
    fn delete(&self, id: &M::Id, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<()>> + Send;

    /// Assign a fresh identifier to `model` and persist it.
    ///
    /// When identifier generation fails its failure is returned and nothing
    /// is persisted.
    fn create(
        &self,
        mut model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        async move {
            let id = self.next_id(cancel).await?;
            model.assign_id(id);
            self.insert(model, cancel).await
        }
    }
}

/// Paginated listing of models matching a filter.
pub trait ModelListing<M: Model, F: ListFilter>: Send + Sync {
    /// List the page of models selected by `filter`.
    fn list(
        &self,
        filter: &F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<M>>> + Send;
}

impl<M: Model, T: ModelRepository<M>> ModelRepository<M> for Arc<T> {
    fn next_id(&self, cancel: &CancellationToken) -> impl Future<Output = Outcome<M::Id>> + Send {
        (**self).next_id(cancel)
    }

    fn insert(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).insert(model, cancel)
    }

    fn get(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).get(id, cancel)
    }

    fn update(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).update(model, cancel)
    }

    fn delete(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).delete(id, cancel)
    }

    fn create(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        (**self).create(model, cancel)
    }
}

impl<M: Model, F: ListFilter, T: ModelListing<M, F>> ModelListing<M, F> for Arc<T> {
    fn list(
        &self,
        filter: &F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<M>>> + Send {
        (**self).list(filter, cancel)
    }
}
