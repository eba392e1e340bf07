//! In-memory tenant registry.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use hexkit_app::ports::TenantRepository;
use hexkit_domain::error::{Failure, Outcome};
use tokio_util::sync::CancellationToken;

use crate::error::{MemoryError, ensure_active};

/// Known tenants and whether each is currently active.
pub struct MemoryTenantRepository<T> {
    tenants: Mutex<BTreeMap<T, bool>>,
}

impl<T: Ord> Default for MemoryTenantRepository<T> {
    fn default() -> Self {
        Self {
            tenants: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<T: Ord + Clone + Debug + Send + Sync> MemoryTenantRepository<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with active tenants.
    pub fn with_tenants(tenants: impl IntoIterator<Item = T>) -> Self {
        Self {
            tenants: Mutex::new(tenants.into_iter().map(|tenant| (tenant, true)).collect()),
        }
    }

    /// Add `tenant` as active, reactivating it if it was deactivated.
    ///
    /// # Errors
    ///
    /// Returns an internal failure if the registry lock is poisoned.
    pub fn register(&self, tenant: T) -> Outcome<()> {
        tracing::debug!(?tenant, "tenant registered");
        self.lock()?.insert(tenant, true);
        Ok(())
    }

    /// Mark `tenant` inactive; it keeps existing but operations on it are
    /// forbidden.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown tenant, or an internal failure if
    /// the registry lock is poisoned.
    pub fn deactivate(&self, tenant: &T) -> Outcome<()> {
        let mut tenants = self.lock()?;
        let Some(active) = tenants.get_mut(tenant) else {
            return Err(Failure::not_found("Tenant", tenant));
        };
        *active = false;
        tracing::debug!(?tenant, "tenant deactivated");
        Ok(())
    }

    fn lock(&self) -> Outcome<MutexGuard<'_, BTreeMap<T, bool>>> {
        self.tenants.lock().map_err(|_| MemoryError::Poisoned.into())
    }

    fn check(&self, tenant: &T, cancel: &CancellationToken) -> Outcome<()> {
        ensure_active(cancel)?;
        match self.lock()?.get(tenant) {
            Some(true) => Ok(()),
            Some(false) => Err(Failure::forbidden(format!("tenant {tenant:?} is deactivated"))),
            None => Err(Failure::not_found("Tenant", tenant)),
        }
    }
}

impl<T: Ord + Clone + Debug + Send + Sync> TenantRepository<T> for MemoryTenantRepository<T> {
    fn exists(
        &self,
        tenant: &T,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self.check(tenant, cancel);
        async move { result }
    }
}
