//! Tenanted model service: the create/update/delete template for models
//! partitioned by tenant.

use std::future::Future;
use std::marker::PhantomData;

use hexkit_domain::error::{Failure, Outcome};
use hexkit_domain::model::TenantedModel;
use hexkit_domain::page::{ListFilter, Page};
use tokio_util::sync::CancellationToken;

use crate::ports::{
    TenantRepository, TenantedModelListing, TenantedModelManagement, TenantedModelRepository,
};
use crate::services::config::{ChangeHookPolicy, ServiceConfig};
use crate::services::hooks::{Change, NoHooks, TenantedModelHooks};
use crate::services::short_circuit;

/// Message of the failure returned when a model's tenant differs from the
/// tenant context of the operation.
pub const TENANT_MISMATCH: &str = "tenant id mismatch";

/// Application service enforcing tenant isolation around the same pipeline
/// as [`ModelService`](super::model_service::ModelService).
///
/// Every operation first checks the tenant through the [`TenantRepository`];
/// create and update additionally require the model to belong to the tenant
/// context before anything else runs.
pub struct TenantedModelService<M, T, R, H = NoHooks> {
    tenants: T,
    repository: R,
    hooks: H,
    config: ServiceConfig,
    _model: PhantomData<fn() -> M>,
}

impl<M, T, R> TenantedModelService<M, T, R>
where
    M: TenantedModel,
    T: TenantRepository<M::TenantId>,
    R: TenantedModelRepository<M>,
{
    /// Create a new service backed by the given tenant lookup and
    /// repository, with default hooks and configuration.
    pub fn new(tenants: T, repository: R) -> Self {
        Self {
            tenants,
            repository,
            hooks: NoHooks,
            config: ServiceConfig::default(),
            _model: PhantomData,
        }
    }
}

impl<M, T, R, H> TenantedModelService<M, T, R, H>
where
    M: TenantedModel,
    T: TenantRepository<M::TenantId>,
    R: TenantedModelRepository<M>,
    H: TenantedModelHooks<M>,
{
    /// Replace the hooks.
    pub fn with_hooks<H2: TenantedModelHooks<M>>(
        self,
        hooks: H2,
    ) -> TenantedModelService<M, T, R, H2> {
        TenantedModelService {
            tenants: self.tenants,
            repository: self.repository,
            hooks,
            config: self.config,
            _model: PhantomData,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tenants(&self) -> &T {
        &self.tenants
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn ensure_tenant(&self, tenant: &M::TenantId, model: &M) -> Outcome<()> {
        if model.belongs_to(tenant) {
            return Ok(());
        }
        tracing::debug!(expected = ?tenant, actual = ?model.tenant_id(), "{TENANT_MISMATCH}");
        Err(Failure::bad_request(TENANT_MISMATCH)
            .with_application_id(self.config.application_id.clone()))
    }

    async fn ensure_tenant_exists(
        &self,
        tenant: &M::TenantId,
        cancel: &CancellationToken,
    ) -> Outcome<()> {
        self.tenants
            .exists(tenant, cancel)
            .await
            .inspect_err(short_circuit("tenant_exists"))
    }

    /// Create a model under `tenant`.
    ///
    /// Checks the model's tenant, the tenant's existence, then runs `mutate`
    /// and `validate_create` before the repository assigns an identifier and
    /// persists. `on_created` runs with the stored model.
    ///
    /// # Errors
    ///
    /// Returns a bad-request failure when the model belongs to another
    /// tenant, otherwise the first failure reported by the tenant lookup, a
    /// hook, or the repository.
    #[tracing::instrument(skip(self, model, cancel))]
    pub async fn create(
        &self,
        tenant: &M::TenantId,
        mut model: M,
        cancel: &CancellationToken,
    ) -> Outcome<M> {
        self.ensure_tenant(tenant, &model)?;
        self.ensure_tenant_exists(tenant, cancel).await?;

        self.hooks
            .mutate(tenant, &mut model, Change::Create, cancel)
            .await
            .inspect_err(short_circuit("mutate"))?;
        self.ensure_tenant(tenant, &model)?;
        self.hooks
            .validate_create(tenant, &model, cancel)
            .await
            .inspect_err(short_circuit("validate_create"))?;

        let created = self
            .repository
            .create(tenant, model, cancel)
            .await
            .inspect_err(short_circuit("repository"))?;

        tracing::trace!(id = ?created.id(), "model created");
        self.hooks.on_created(tenant, &created, cancel).await;
        Ok(created)
    }

    /// Update a model of `tenant`.
    ///
    /// `on_changed` fires according to [`ServiceConfig::change_hook`]; by
    /// default only when the repository rejects the update.
    ///
    /// # Errors
    ///
    /// Returns a bad-request failure when the model belongs to another
    /// tenant, otherwise the first failure reported by the tenant lookup, a
    /// hook, or the repository.
    #[tracing::instrument(skip(self, model, cancel), fields(id = ?model.id()))]
    pub async fn update(
        &self,
        tenant: &M::TenantId,
        mut model: M,
        cancel: &CancellationToken,
    ) -> Outcome<M> {
        self.ensure_tenant(tenant, &model)?;
        self.ensure_tenant_exists(tenant, cancel).await?;

        self.hooks
            .mutate(tenant, &mut model, Change::Update, cancel)
            .await
            .inspect_err(short_circuit("mutate"))?;
        self.ensure_tenant(tenant, &model)?;
        self.hooks
            .validate_update(tenant, &model, cancel)
            .await
            .inspect_err(short_circuit("validate_update"))?;

        let submitted = match self.config.change_hook {
            ChangeHookPolicy::OnFailure => Some(model.clone()),
            ChangeHookPolicy::OnSuccess => None,
        };

        match self.repository.update(tenant, model, cancel).await {
            Ok(updated) => {
                if self.config.change_hook == ChangeHookPolicy::OnSuccess {
                    self.hooks.on_changed(tenant, &updated, cancel).await;
                }
                Ok(updated)
            }
            Err(err) => {
                short_circuit("repository")(&err);
                if let Some(submitted) = submitted {
                    self.hooks.on_changed(tenant, &submitted, cancel).await;
                }
                Err(err)
            }
        }
    }

    /// Delete a model of `tenant` by id.
    ///
    /// Once the tenant check and `validate_delete` pass, deleting an id the
    /// repository does not know succeeds.
    ///
    /// # Errors
    ///
    /// Returns the tenant lookup failure, a failure from `validate_delete`,
    /// or any repository failure other than not-found.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> Outcome<()> {
        self.ensure_tenant_exists(tenant, cancel).await?;
        self.hooks
            .validate_delete(tenant, id, cancel)
            .await
            .inspect_err(short_circuit("validate_delete"))?;

        match self.repository.delete(tenant, id, cancel).await {
            Ok(()) => {
                self.hooks.on_removed(tenant, id, cancel).await;
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!("model already absent, treating delete as done");
                Ok(())
            }
            Err(err) => {
                short_circuit("repository")(&err);
                Err(err)
            }
        }
    }

    /// Look up a model of `tenant` by id.
    ///
    /// # Errors
    ///
    /// Returns the tenant lookup failure or the repository failure,
    /// including not-found.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn get(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> Outcome<M> {
        self.ensure_tenant_exists(tenant, cancel).await?;
        self.repository.get(tenant, id, cancel).await
    }

    /// List the page of `tenant`'s models selected by `filter`.
    ///
    /// # Errors
    ///
    /// Returns the tenant lookup failure or the repository failure.
    pub async fn list<F>(
        &self,
        tenant: &M::TenantId,
        filter: &F,
        cancel: &CancellationToken,
    ) -> Outcome<Page<M>>
    where
        F: ListFilter,
        R: TenantedModelListing<M, F>,
    {
        self.ensure_tenant_exists(tenant, cancel).await?;
        self.repository.list(tenant, filter, cancel).await
    }
}

impl<M, T, R, H> TenantedModelManagement<M> for TenantedModelService<M, T, R, H>
where
    M: TenantedModel,
    T: TenantRepository<M::TenantId>,
    R: TenantedModelRepository<M>,
    H: TenantedModelHooks<M>,
{
    fn create(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        Self::create(self, tenant, model, cancel)
    }

    fn update(
        &self,
        tenant: &M::TenantId,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        Self::update(self, tenant, model, cancel)
    }

    fn delete(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        Self::delete(self, tenant, id, cancel)
    }

    fn get(
        &self,
        tenant: &M::TenantId,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        Self::get(self, tenant, id, cancel)
    }
}
