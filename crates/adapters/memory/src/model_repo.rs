//! In-memory implementation of [`ModelRepository`] and [`ModelListing`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use hexkit_app::ports::{IdGenerator, ModelListing, ModelRepository};
use hexkit_domain::error::{Failure, Outcome};
use hexkit_domain::model::Model;
use hexkit_domain::page::{ListFilter, Page};
use tokio_util::sync::CancellationToken;

use crate::Matches;
use crate::error::{MemoryError, ensure_active, model_name};

/// Map-backed repository; models are kept in identifier order.
pub struct MemoryModelRepository<M: Model, G> {
    store: Mutex<BTreeMap<M::Id, M>>,
    ids: G,
}

impl<M: Model, G: IdGenerator<M::Id>> MemoryModelRepository<M, G> {
    /// Create an empty repository drawing identifiers from `ids`.
    pub fn new(ids: G) -> Self {
        Self {
            store: Mutex::new(BTreeMap::new()),
            ids,
        }
    }

    /// Number of stored models.
    ///
    /// # Errors
    ///
    /// Returns an internal failure if the store lock is poisoned.
    pub fn count(&self) -> Outcome<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Outcome<MutexGuard<'_, BTreeMap<M::Id, M>>> {
        self.store.lock().map_err(|_| MemoryError::Poisoned.into())
    }

    fn insert_now(&self, model: M, cancel: &CancellationToken) -> Outcome<M> {
        ensure_active(cancel)?;
        let mut store = self.lock()?;
        if store.contains_key(model.id()) {
            return Err(Failure::conflict(format!(
                "{} {:?} already exists",
                model_name::<M>(),
                model.id()
            )));
        }
        store.insert(model.id().clone(), model.clone());
        Ok(model)
    }

    fn get_now(&self, id: &M::Id, cancel: &CancellationToken) -> Outcome<M> {
        ensure_active(cancel)?;
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| Failure::not_found(model_name::<M>(), id))
    }

    fn update_now(&self, model: M, cancel: &CancellationToken) -> Outcome<M> {
        ensure_active(cancel)?;
        let mut store = self.lock()?;
        let Some(slot) = store.get_mut(model.id()) else {
            return Err(Failure::not_found(model_name::<M>(), model.id()));
        };
        slot.clone_from(&model);
        Ok(model)
    }

    fn delete_now(&self, id: &M::Id, cancel: &CancellationToken) -> Outcome<()> {
        ensure_active(cancel)?;
        self.lock()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Failure::not_found(model_name::<M>(), id))
    }
}

impl<M: Model, G: IdGenerator<M::Id>> ModelRepository<M> for MemoryModelRepository<M, G> {
    fn next_id(&self, cancel: &CancellationToken) -> impl Future<Output = Outcome<M::Id>> + Send {
        let result = ensure_active(cancel).and_then(|()| self.ids.next_id());
        async move { result }
    }

    fn insert(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        let result = self.insert_now(model, cancel);
        async move { result }
    }

    fn get(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        let result = self.get_now(id, cancel);
        async move { result }
    }

    fn update(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        let result = self.update_now(model, cancel);
        async move { result }
    }

    fn delete(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self.delete_now(id, cancel);
        async move { result }
    }
}

impl<M, G, F> ModelListing<M, F> for MemoryModelRepository<M, G>
where
    M: Model,
    G: IdGenerator<M::Id>,
    F: ListFilter + Matches<M>,
{
    fn list(
        &self,
        filter: &F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<M>>> + Send {
        let result = ensure_active(cancel)
            .and_then(|()| self.lock())
            .map(|store| crate::paginate(store.values(), filter));
        async move { result }
    }
}
