//! Shape requirements for models handled by repositories and services.

use std::fmt::Debug;

/// A domain object identified by a unique key.
///
/// The identifier is chosen by the repository at creation time; callers
/// build models with a placeholder id and read the real one from the
/// created model.
pub trait Model: Clone + Send + Sync + 'static {
    /// Comparable identifier type.
    type Id: Ord + Clone + Debug + Send + Sync + 'static;

    /// Returns the model identifier.
    fn id(&self) -> &Self::Id;

    /// Overwrite the identifier. Reserved for the repository creation path.
    fn assign_id(&mut self, id: Self::Id);
}

/// A model partitioned by tenant.
///
/// The tenant is fixed at creation and must match the tenant context of
/// every operation performed on the model.
pub trait TenantedModel: Model {
    /// Comparable tenant identifier type.
    type TenantId: Ord + Clone + Debug + Send + Sync + 'static;

    /// Returns the tenant owning this model.
    fn tenant_id(&self) -> &Self::TenantId;

    /// Whether the model belongs to `tenant`.
    fn belongs_to(&self, tenant: &Self::TenantId) -> bool {
        self.tenant_id() == tenant
    }
}
