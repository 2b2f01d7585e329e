//! Simulation constants and tunable defaults.

/// Default fixed simulation timestep (seconds). 1/50th of a second,
/// matching the host engine's physics tick.
pub const DEFAULT_FIXED_DT: f32 = 0.02;

/// Default number of spring relaxation iterations per fixed step.
pub const DEFAULT_RELAX_ITERATIONS: u32 = 2;

/// Squared rest-length threshold below which an edge is considered
/// degenerate and excluded from the edge graph. Avoids division by a
/// near-zero direction vector in the spring solver.
pub const DEGENERATE_EDGE_EPSILON_SQ: f32 = 1.0e-10;

/// Velocity scale applied to a vertex whose displacement from rest was
/// clamped, bleeding off the energy that drove it past the limit.
pub const CLAMP_VELOCITY_BLEED: f32 = 0.2;

/// Velocity scale applied to vertices affected by a plastic impact,
/// keeping the solver stable around freshly dented geometry.
pub const IMPACT_VELOCITY_DAMP: f32 = 0.25;

/// Extra padding (beyond twice the impact radius) added when expanding a
/// region volume's bounds for the vertex-assignment prefilter.
pub const REGION_BOUNDS_PAD: f32 = 0.5;

/// World-space anchor separation above which a joint link counts as
/// stressed, regardless of the reported joint force.
pub const ANCHOR_SEPARATION_TOLERANCE: f32 = 0.005;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;
