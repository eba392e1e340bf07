//! In-memory implementation of [`TenantedModelRepository`] and
//! [`TenantedModelListing`]. Models are keyed by `(tenant, id)` so one
//! tenant can never observe another's rows.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use hexkit_app::ports::{IdGenerator, TenantedModelListing, TenantedModelRepository};
use hexkit_domain::error::{Failure, Outcome};
use hexkit_domain::model::TenantedModel;
use hexkit_domain::page::{ListFilter, Page};
use tokio_util::sync::CancellationToken;

use crate::Matches;
use crate::error::{MemoryError, ensure_active, model_name};

type Key<M> = (<M as TenantedModel>::TenantId, <M as hexkit_domain::model::Model>::Id);

/// Map-backed repository partitioned by tenant; each tenant's models are
/// kept in identifier order.
pub struct MemoryTenantedModelRepository<M: TenantedModel, G> {
    store: Mutex<BTreeMap<Key<M>, M>>,
    ids: G,
}

impl<M: TenantedModel, G: IdGenerator<M::Id>> MemoryTenantedModelRepository<M, G> {
    /// Create an empty repository drawing identifiers from `ids`.
    pub fn new(ids: G) -> Self {
        Self {
            store: Mutex::new(BTreeMap::new()),
            ids,
        }
    }

    /// Number of models stored for `tenant`.
    ///
    /// # Errors
    ///
    /// Returns an internal failure if the store lock is poisoned.
    pub fn count(&self, tenant: &M::TenantId) -> Outcome<usize> {
        Ok(self.lock()?.keys().filter(|(owner, _)| owner == tenant).count())
    }

    fn lock(&self) -> Outcome<MutexGuard<'_, BTreeMap<Key<M>, M>>> {
        self.store.lock().map_err(|_| MemoryError::Poisoned.into())
    }

    fn key(tenant: &M::TenantId, id: &M::Id) -> Key<M> {
        (tenant.clone(), id.clone())
    }

    fn ensure_owned(tenant: &M::TenantId, model: &M) -> Outcome<()> {
        if model.belongs_to(tenant) {
            return Ok(());
        }
        Err(Failure::bad_request(format!(
            "{} {:?} belongs to tenant {:?}, not {tenant:?}",
            model_name::<M>(),
            model.id(),
            model.tenant_id()
        )))
    }

    fn insert_now(&self, tenant: &M::TenantId, model: M, cancel: &CancellationToken) -> Outcome<M> {
        ensure_active(cancel)?;
        Self::ensure_owned(tenant, &model)?;
        let key = Self::key(tenant, model.id());
        let mut store = self.lock()?;
        if store.contains_key(&key) {
            return Err(Failure::conflict(format!(
                "{} {:?} already exists for tenant {tenant:?}",
                model_name::<M>(),
                model.id()
            )));
        }
        store.insert(key, model.clone());
        Ok(model)
    }

    fn get_now(&self, tenant: &M::TenantId, id: &M::Id, cancel: &CancellationToken) -> Outcome<M> {
        ensure_active(cancel)?;
        self.lock()?
            .get(&Self::key(tenant, id))
            .cloned()
            .ok_or_else(|| Failure::not_found(model_name::<M>(), id))
    }

    fn update_now(&self, tenant: &M::TenantId, model: M, cancel: &CancellationToken) -> Outcome<M> {
        ensure_active(cancel)?;
        Self::ensure_owned(tenant, &model)?;
        let mut store = self.lock()?;
        let Some(slot) = store.get_mut(&Self::key(tenant, model.id())) else {
            return Err(Failure::not_found(model_name::<M>(), model.id()));
        };
        slot.clone_from(&model);
        Ok(model)
    }

    fn delete_now(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> Outcome<()> {
        ensure_active(cancel)?;
        self.lock()?
            .remove(&Self::key(tenant, id))
            .map(|_| ())
            .ok_or_else(|| Failure::not_found(model_name::<M>(), id))
    }
}

impl<M: TenantedModel, G: IdGenerator<M::Id>> TenantedModelRepository<M>
    for MemoryTenantedModelRepository<M, G>
{
    fn next_id(
        &self,
        _tenant: &M::TenantId,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M::Id>> + Send {
        let result = ensure_active(cancel).and_then(|()| self.ids.next_id());
        async move { result }
    }

    fn insert(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        let result = self.insert_now(tenant, model, cancel);
        async move { result }
    }

    fn get(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        let result = self.get_now(tenant, id, cancel);
        async move { result }
    }

    fn update(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        let result = self.update_now(tenant, model, cancel);
        async move { result }
    }

    fn delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self.delete_now(tenant, id, cancel);
        async move { result }
    }
}

impl<M, G, F> TenantedModelListing<M, F> for MemoryTenantedModelRepository<M, G>
where
    M: TenantedModel,
    G: IdGenerator<M::Id>,
    F: ListFilter + Matches<M>,
{
    fn list(
        &self,
        tenant: &M::TenantId,
        filter: &F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<M>>> + Send {
        let result = ensure_active(cancel).and_then(|()| self.lock()).map(|store| {
            let owned = store
                .iter()
                .filter(|((owner, _), _)| owner == tenant)
                .map(|(_, model)| model);
            crate::paginate(owned, filter)
        });
        async move { result }
    }
}
