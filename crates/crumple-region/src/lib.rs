//! # crumple-region
//!
//! Region collision volumes and vertex-to-region attribution for the
//! Crumple deformation engine.
//!
//! A *region* associates a subset of cage vertices with one collision
//! volume (capsule or box). Contact events report which volume was
//! struck; the plastic operator then deforms only that region's
//! vertices.
//!
//! ## Key Types
//!
//! - [`RegionVolume`] — tagged capsule/box volume with distance queries
//! - [`RegionDescriptor`] — volume plus host-transform identity
//! - [`RegionMap`] — vertex → region assignment, built once
//! - [`ContactEvent`] — impulse-resolved contact feed from the host

pub mod assignment;
pub mod contact;
pub mod volume;

pub use assignment::RegionMap;
pub use contact::{ContactEvent, ContactPoint};
pub use volume::{RegionDescriptor, RegionVolume, TransformTag};
