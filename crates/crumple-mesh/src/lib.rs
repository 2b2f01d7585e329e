//! # crumple-mesh
//!
//! Cage mesh storage and topology for the Crumple deformation engine.
//!
//! ## Key Types
//!
//! - [`CageMesh`] — low-poly triangle mesh in SoA layout, with cached bounds
//! - [`topology::EdgeGraph`] — deduplicated edges with captured rest lengths
//! - [`normals`] — area-weighted vertex normal recomputation
//! - [`generators`] — procedural meshes for tests and demo scenarios

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod topology;

pub use mesh::CageMesh;
pub use topology::EdgeGraph;
