//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the service templates and the outside
//! world. Outbound ports (repositories, tenant lookup, id generation) are
//! implemented by persistence adapters; inbound ports are implemented by the
//! services and consumed by transport layers.

pub mod id_generator;
pub mod inbound;
pub mod repository;
pub mod tenant;
pub mod tenanted_repository;

pub use id_generator::IdGenerator;
pub use inbound::{ModelManagement, TenantedModelManagement};
pub use repository::{ModelListing, ModelRepository};
pub use tenant::TenantRepository;
pub use tenanted_repository::{TenantedModelListing, TenantedModelRepository};
