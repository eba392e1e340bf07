//! Extension points of the service templates.
//!
//! Every hook has a default that succeeds (validation, mutation) or does
//! nothing (post-processing), so implementors only override the steps they
//! care about. [`NoHooks`] keeps all defaults.

use std::future::Future;
use std::sync::Arc;

use hexkit_domain::error::Outcome;
use hexkit_domain::model::{Model, TenantedModel};
use tokio_util::sync::CancellationToken;

/// Which mutation is being prepared when the `mutate` hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Create,
    Update,
}

impl Change {
    /// Whether the model has not been persisted yet.
    #[must_use]
    pub fn is_new(self) -> bool {
        self == Self::Create
    }
}

/// Hooks for [`ModelService`](super::model_service::ModelService).
pub trait ModelHooks<M: Model>: Send + Sync {
    /// Normalize or default fields before validation.
    fn mutate(
        &self,
        _model: &mut M,
        _change: Change,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    /// Business rules a new model must satisfy.
    fn validate_create(
        &self,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    /// Business rules an updated model must satisfy.
    fn validate_update(
        &self,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    /// Business rules gating a deletion.
    fn validate_delete(
        &self,
        _id: &M::Id,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    /// Side effects after a successful creation.
    fn on_created(
        &self,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// Side effects around an update; see
    /// [`ChangeHookPolicy`](super::config::ChangeHookPolicy) for when it fires.
    fn on_changed(
        &self,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// Side effects after a successful deletion.
    fn on_removed(
        &self,
        _id: &M::Id,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }
}

/// Hooks for [`TenantedModelService`](super::tenanted_model_service::TenantedModelService).
///
/// Mirrors [`ModelHooks`] with the tenant context as an extra argument.
pub trait TenantedModelHooks<M: TenantedModel>: Send + Sync {
    fn mutate(
        &self,
        _tenant: &M::TenantId,
        _model: &mut M,
        _change: Change,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    fn validate_create(
        &self,
        _tenant: &M::TenantId,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    fn validate_update(
        &self,
        _tenant: &M::TenantId,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    fn validate_delete(
        &self,
        _tenant: &M::TenantId,
        _id: &M::Id,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        async { Ok(()) }
    }

    fn on_created(
        &self,
        _tenant: &M::TenantId,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }

    fn on_changed(
        &self,
        _tenant: &M::TenantId,
        _model: &M,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }

    fn on_removed(
        &self,
        _tenant: &M::TenantId,
        _id: &M::Id,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }
}

/// Hooks keeping every default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<M: Model> ModelHooks<M> for NoHooks {}

impl<M: TenantedModel> TenantedModelHooks<M> for NoHooks {}

impl<M: Model, H: ModelHooks<M>> ModelHooks<M> for Arc<H> {
    fn mutate(
        &self,
        model: &mut M,
        change: Change,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).mutate(model, change, cancel)
    }

    fn validate_create(
        &self,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).validate_create(model, cancel)
    }

    fn validate_update(
        &self,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).validate_update(model, cancel)
    }

    fn validate_delete(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).validate_delete(id, cancel)
    }

    fn on_created(&self, model: &M, cancel: &CancellationToken) -> impl Future<Output = ()> + Send {
        (**self).on_created(model, cancel)
    }

    fn on_changed(
        &self,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        (**self).on_changed(model, cancel)
    }

    fn on_removed(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        (**self).on_removed(id, cancel)
    }
}

impl<M: TenantedModel, H: TenantedModelHooks<M>> TenantedModelHooks<M> for Arc<H> {
    fn mutate(
        &self,
        tenant: &M::TenantId,
        model: &mut M,
        change: Change,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).mutate(tenant, model, change, cancel)
    }

    fn validate_create(
        &self,
        tenant: &M::TenantId,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).validate_create(tenant, model, cancel)
    }

    fn validate_update(
        &self,
        tenant: &M::TenantId,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).validate_update(tenant, model, cancel)
    }

    fn validate_delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        (**self).validate_delete(tenant, id, cancel)
    }

    fn on_created(
        &self,
        tenant: &M::TenantId,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        (**self).on_created(tenant, model, cancel)
    }

    fn on_changed(
        &self,
        tenant: &M::TenantId,
        model: &M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        (**self).on_changed(tenant, model, cancel)
    }

    fn on_removed(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        (**self).on_removed(tenant, id, cancel)
    }
}
