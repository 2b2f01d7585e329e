//! # crumple-solver
//!
//! The vertex-spring cage deformer: elastic relaxation plus permanent
//! (plastic) impact dents.
//!
//! ## Key Types
//!
//! - [`DeformState`] — SoA buffers for rest/current positions and velocities
//! - [`DeformerConfig`] — tunable parameters, serde-loadable
//! - [`CageDeformer`] — host-facing façade: `step_fixed(dt)` / `on_contact(event)`
//!
//! ## Step ordering
//!
//! Within one fixed step: spring relaxation iterations, then the pin
//! pass, then integration/clamping, then the mesh buffer is published
//! (normals and bounds refreshed). Plastic deformation from contact
//! events is applied synchronously inside `on_contact`, before the
//! next relaxation pass sees the updated rest positions.

pub mod config;
pub mod deformer;
pub mod impact;
pub mod relaxation;
pub mod state;

pub use config::DeformerConfig;
pub use deformer::CageDeformer;
pub use state::DeformState;
