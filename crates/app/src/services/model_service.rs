//! Model service: the create/update/delete template for non-tenanted models.

use std::future::Future;
use std::marker::PhantomData;

use hexkit_domain::error::Outcome;
use hexkit_domain::model::Model;
use hexkit_domain::page::{ListFilter, Page};
use tokio_util::sync::CancellationToken;

use crate::ports::{ModelListing, ModelManagement, ModelRepository};
use crate::services::config::{ChangeHookPolicy, ServiceConfig};
use crate::services::hooks::{Change, ModelHooks, NoHooks};
use crate::services::short_circuit;

/// Application service running the fixed mutate → validate → persist →
/// post-process pipeline around a [`ModelRepository`].
///
/// The service keeps no state between calls; concurrent calls only share
/// the repository and the hooks.
pub struct ModelService<M, R, H = NoHooks> {
    repository: R,
    hooks: H,
    config: ServiceConfig,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model, R: ModelRepository<M>> ModelService<M, R> {
    /// Create a new service backed by the given repository, with default
    /// hooks and configuration.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            hooks: NoHooks,
            config: ServiceConfig::default(),
            _model: PhantomData,
        }
    }
}

impl<M: Model, R: ModelRepository<M>, H: ModelHooks<M>> ModelService<M, R, H> {
    /// Replace the hooks.
    pub fn with_hooks<H2: ModelHooks<M>>(self, hooks: H2) -> ModelService<M, R, H2> {
        ModelService {
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

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Create a model.
    ///
    /// Runs `mutate` and `validate_create`, lets the repository assign an
    /// identifier and persist, then runs `on_created` with the stored model.
    ///
    /// # Errors
    ///
    /// Returns the first failure reported by a hook or by the repository;
    /// later steps are skipped.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, mut model: M, cancel: &CancellationToken) -> Outcome<M> {
        self.hooks
            .mutate(&mut model, Change::Create, cancel)
            .await
            .inspect_err(short_circuit("mutate"))?;
        self.hooks
            .validate_create(&model, cancel)
            .await
            .inspect_err(short_circuit("validate_create"))?;

        let created = self
            .repository
            .create(model, cancel)
            .await
            .inspect_err(short_circuit("repository"))?;

        tracing::trace!(id = ?created.id(), "model created");
        self.hooks.on_created(&created, cancel).await;
        Ok(created)
    }

    /// Update a model.
    ///
    /// `on_changed` fires according to [`ServiceConfig::change_hook`]; by
    /// default only when the repository rejects the update.
    ///
    /// # Errors
    ///
    /// Returns the first failure reported by a hook or by the repository.
    #[tracing::instrument(skip_all, fields(id = ?model.id()))]
    pub async fn update(&self, mut model: M, cancel: &CancellationToken) -> Outcome<M> {
        self.hooks
            .mutate(&mut model, Change::Update, cancel)
            .await
            .inspect_err(short_circuit("mutate"))?;
        self.hooks
            .validate_update(&model, cancel)
            .await
            .inspect_err(short_circuit("validate_update"))?;

        let submitted = match self.config.change_hook {
            ChangeHookPolicy::OnFailure => Some(model.clone()),
            ChangeHookPolicy::OnSuccess => None,
        };

        match self.repository.update(model, cancel).await {
            Ok(updated) => {
                if self.config.change_hook == ChangeHookPolicy::OnSuccess {
                    self.hooks.on_changed(&updated, cancel).await;
                }
                Ok(updated)
            }
            Err(err) => {
                short_circuit("repository")(&err);
                if let Some(submitted) = submitted {
                    self.hooks.on_changed(&submitted, cancel).await;
                }
                Err(err)
            }
        }
    }

    /// Delete a model by id.
    ///
    /// Deleting an id the repository does not know succeeds: the model is
    /// already gone. `on_removed` only runs when the repository deleted
    /// something.
    ///
    /// # Errors
    ///
    /// Returns a failure from `validate_delete`, or any repository failure
    /// other than not-found.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn delete(&self, id: &M::Id, cancel: &CancellationToken) -> Outcome<()> {
        self.hooks
            .validate_delete(id, cancel)
            .await
            .inspect_err(short_circuit("validate_delete"))?;

        match self.repository.delete(id, cancel).await {
            Ok(()) => {
                self.hooks.on_removed(id, cancel).await;
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

    /// Look up a model by id.
    ///
    /// # Errors
    ///
    /// Propagates the repository failure, including not-found.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn get(&self, id: &M::Id, cancel: &CancellationToken) -> Outcome<M> {
        self.repository.get(id, cancel).await
    }

    /// List the page of models selected by `filter`.
    ///
    /// # Errors
    ///
    /// Propagates the repository failure.
    pub async fn list<F>(&self, filter: &F, cancel: &CancellationToken) -> Outcome<Page<M>>
    where
        F: ListFilter,
        R: ModelListing<M, F>,
    {
        self.repository.list(filter, cancel).await
    }
}

impl<M: Model, R: ModelRepository<M>, H: ModelHooks<M>> ModelManagement<M>
    for ModelService<M, R, H>
{
    fn create(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        Self::create(self, model, cancel)
    }

    fn update(
        &self,
        model: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        Self::update(self, model, cancel)
    }

    fn delete(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        Self::delete(self, id, cancel)
    }

    fn get(
        &self,
        id: &M::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<M>> + Send {
        Self::get(self, id, cancel)
    }
}
