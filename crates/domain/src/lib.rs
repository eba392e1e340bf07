//! # hexkit-domain
//!
//! Domain contracts shared by every hexkit layer.
//!
//! ## Responsibilities
//! - Model contracts: [`Model`](model::Model) and
//!   [`TenantedModel`](model::TenantedModel)
//! - The classified [`Failure`](error::Failure) carried by every
//!   [`Outcome`](error::Outcome)
//! - Paging primitives for list operations
//! - A macro for UUID-backed identifier newtypes
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod error;
pub mod id;
pub mod model;
pub mod page;
