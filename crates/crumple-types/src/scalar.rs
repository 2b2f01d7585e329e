//! Scalar type alias for the simulation.
//!
//! Using `f32` to match the host engine's transform and mesh precision.
//! This alias makes it easy to experiment with `f64` precision if needed.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
