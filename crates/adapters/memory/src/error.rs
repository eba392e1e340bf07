//! Adapter-specific error type and the checks shared by every store.

use hexkit_domain::error::{Failure, Outcome};
use tokio_util::sync::CancellationToken;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// A thread panicked while holding a store lock.
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

impl From<MemoryError> for Failure {
    fn from(err: MemoryError) -> Self {
        tracing::error!(error = %err, "memory store unavailable");
        Failure::internal("storage unavailable").with_source(err)
    }
}

/// Fail with [`Failure::cancelled`] once `cancel` has fired.
pub(crate) fn ensure_active(cancel: &CancellationToken) -> Outcome<()> {
    if cancel.is_cancelled() {
        return Err(Failure::cancelled());
    }
    Ok(())
}

/// Short type name of `M`, used in not-found messages.
pub(crate) fn model_name<M>() -> &'static str {
    let full = std::any::type_name::<M>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
