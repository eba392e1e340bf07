//! # hexkit-adapter-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement [`ModelRepository`](hexkit_app::ports::ModelRepository),
//!   [`TenantedModelRepository`](hexkit_app::ports::TenantedModelRepository)
//!   and [`TenantRepository`](hexkit_app::ports::TenantRepository) over
//!   mutex-guarded ordered maps
//! - Translate lock poisoning and cancellation into domain [`Failure`]s
//!
//! ## Dependency rule
//! Depends on `hexkit-domain` (types) and `hexkit-app` (port traits).
//!
//! [`Failure`]: hexkit_domain::error::Failure

mod error;
mod model_repo;
mod tenant_repo;
mod tenanted_repo;

pub use error::MemoryError;
pub use model_repo::MemoryModelRepository;
pub use tenant_repo::MemoryTenantRepository;
pub use tenanted_repo::MemoryTenantedModelRepository;

use hexkit_domain::page::{ListFilter, Page, PageRequest};

/// Predicate a list filter applies to stored models.
pub trait Matches<M> {
    fn matches(&self, model: &M) -> bool;
}

impl<M> Matches<M> for PageRequest {
    fn matches(&self, _model: &M) -> bool {
        true
    }
}

/// Apply `filter` to `models` (already in identifier order) and cut its page.
fn paginate<'a, M, F>(models: impl Iterator<Item = &'a M>, filter: &F) -> Page<M>
where
    M: Clone + 'a,
    F: ListFilter + Matches<M>,
{
    let request = filter.page();
    let matching: Vec<&M> = models.filter(|model| filter.matches(model)).collect();
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let items = matching
        .iter()
        .skip(skip)
        .take(take)
        .map(|model| (*model).clone())
        .collect();
    Page::new(items, matching.len() as u64, request)
}
