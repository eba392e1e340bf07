//! Tenant port: existence checks gating every tenant-scoped operation.

use std::future::Future;
use std::sync::Arc;

use hexkit_domain::error::Outcome;
use tokio_util::sync::CancellationToken;

/// Answers whether a tenant may be acted upon.
pub trait TenantRepository<T>: Send + Sync {
    /// Succeed when `tenant` exists and is active.
    ///
    /// The returned failure is handed back unchanged to the caller of the
    /// blocked operation.
    fn exists(&self, tenant: &T, cancel: &CancellationToken)
    -> impl Future<Output = Outcome<()>> + Send;
}

impl<T, R: TenantRepository<T>> TenantRepository<T> for Arc<R> {
    fn exists(
        &self,
        tenant: &T,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).exists(tenant, cancel)
    }
}
