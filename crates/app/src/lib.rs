//! # hexkit-app
//!
//! Application layer: **port definitions** (traits) and the service
//! templates.
//!
//! ## Responsibilities
//! - Define **driven/outbound ports** that adapters implement:
//!   - `ModelRepository` / `ModelListing`: persistence for models
//!   - `TenantedModelRepository` / `TenantedModelListing`: persistence for
//!     tenant-scoped models
//!   - `TenantRepository`: tenant existence checks
//!   - `IdGenerator`: fresh identifiers
//! - Define **driving/inbound ports**: `ModelManagement`,
//!   `TenantedModelManagement`
//! - Provide the service templates: `ModelService`, `TenantedModelService`,
//!   with their hooks and configuration
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (identifier generators)
//!
//! ## Dependency rule
//! Depends on `hexkit-domain` only (plus `tokio-util` for cancellation).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod id_generator;
pub mod ports;
pub mod services;
