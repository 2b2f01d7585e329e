//! Deformer configuration.
//!
//! All tunables of the vertex-spring deformer in one serde-friendly
//! struct. Validated at construction — the deformer is never built
//! with an invalid configuration.

use serde::{Deserialize, Serialize};

use crumple_math::Vec3;
use crumple_types::constants::DEFAULT_RELAX_ITERATIONS;
use crumple_types::{CrumpleError, CrumpleResult};

/// Configuration for the cage deformer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeformerConfig {
    /// Influence radius of a plastic impact (meters).
    pub impact_radius: f32,

    /// Impulse threshold below which a contact is purely elastic (N·s).
    pub plastic_yield: f32,

    /// Plastic displacement per unit of impulse over yield (m per N·s).
    pub plastic_scale: f32,

    /// Maximum elastic displacement of any vertex from its rest
    /// position (meters). Displacement beyond this is clamped.
    pub max_vertex_displacement: f32,

    /// Spring stiffness along each edge.
    pub spring_constant: f32,

    /// Damping on the relative velocity along each edge.
    pub damping_constant: f32,

    /// Spring relaxation iterations per fixed step.
    pub relax_iterations: u32,

    /// Strength of the pull of each vertex's velocity toward its rest
    /// position. Prevents long-term drift; plastic dents persist
    /// because they move the rest positions themselves.
    pub pin_strength: f32,

    /// Whether impacts also apply the hinge bend about the mirror axis.
    pub enable_bend: bool,

    /// Maximum hinge bend angle at full impact weight (radians).
    pub max_bend_angle: f32,

    /// Mirror axis in the cage's local space. Impact push-in direction
    /// and bend sign flip across the plane orthogonal to this axis.
    pub mirror_axis: Vec3,
}

impl Default for DeformerConfig {
    fn default() -> Self {
        Self {
            impact_radius: 0.3,
            plastic_yield: 100.0,
            plastic_scale: 0.0015,
            max_vertex_displacement: 0.05,
            spring_constant: 500.0,
            damping_constant: 20.0,
            relax_iterations: DEFAULT_RELAX_ITERATIONS,
            pin_strength: 10.0,
            enable_bend: true,
            max_bend_angle: 0.035,
            mirror_axis: Vec3::X,
        }
    }
}

impl DeformerConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> CrumpleResult<()> {
        if self.impact_radius <= 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "impact_radius must be positive".into(),
            ));
        }
        if self.plastic_yield < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "plastic_yield must be non-negative".into(),
            ));
        }
        if self.plastic_scale < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "plastic_scale must be non-negative".into(),
            ));
        }
        if self.max_vertex_displacement <= 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "max_vertex_displacement must be positive".into(),
            ));
        }
        if self.spring_constant < 0.0 || self.damping_constant < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "spring and damping constants must be non-negative".into(),
            ));
        }
        if self.relax_iterations == 0 {
            return Err(CrumpleError::InvalidConfig(
                "relax_iterations must be at least 1".into(),
            ));
        }
        if self.pin_strength < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "pin_strength must be non-negative".into(),
            ));
        }
        if self.mirror_axis.length_squared() < 1e-12 {
            return Err(CrumpleError::InvalidConfig(
                "mirror_axis must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The mirror axis, normalized.
    #[inline]
    pub fn mirror_axis_normalized(&self) -> Vec3 {
        self.mirror_axis.normalize()
    }
}
