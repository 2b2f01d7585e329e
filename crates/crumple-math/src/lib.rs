//! # crumple-math
//!
//! Linear algebra primitives for the Crumple deformation engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Quat`, etc.)
//! - Smoothstep-based impact falloff
//! - Mirror-axis decomposition and hinge rotation helpers
//! - Axis-aligned bounding box with expansion/containment queries

pub mod aabb;
pub mod axis;
pub mod falloff;

// Re-export glam types as the canonical math types for Crumple.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use aabb::Aabb;
