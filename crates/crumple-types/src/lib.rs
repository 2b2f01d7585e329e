//! # crumple-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the Crumple cage deformation engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Crumple crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{CrumpleError, CrumpleResult};
pub use ids::{LinkId, RegionId, VertexId};
pub use scalar::Scalar;
