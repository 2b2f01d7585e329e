//! # crumple-joint
//!
//! The joint-offset rest-shift system: the second deformation track.
//!
//! Instead of moving mesh vertices, each [`JointLink`] accumulates a
//! persistent offset to its joint's rest anchor whenever stress
//! exceeds a threshold. A *bake* converts accumulated offsets into
//! bone local positions, committing dents as new reference geometry.
//!
//! ## Key Types
//!
//! - [`CageSkeleton`] — bone hierarchy the proxies track
//! - [`JointLink`] — one dynamic-body-to-proxy connection
//! - [`CageDriver`] — per-step stress accumulation, bake, clear
//! - [`CageDriverConfig`] — thresholds and auto-bake policy

pub mod config;
pub mod driver;
pub mod link;
pub mod skeleton;

pub use config::CageDriverConfig;
pub use driver::{CageDriver, LinkFeedback};
pub use link::{JointLink, LinkDescriptor};
pub use skeleton::{CageBone, CageSkeleton};
