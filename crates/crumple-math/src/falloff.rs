//! Impact falloff weighting.
//!
//! A plastic impact affects vertices inside a sphere around the contact
//! point. The weight eases from 1 at the contact point to 0 at the
//! influence radius using a Hermite smoothstep.

/// Hermite smoothstep: 0 at `edge0`, 1 at `edge1`, C¹-continuous between.
///
/// Input outside `[edge0, edge1]` is clamped.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Falloff weight for a vertex at `distance` from a contact point with
/// the given influence `radius`.
///
/// Returns 1.0 at the contact point, 0.0 at (and beyond) the radius
/// boundary, with a smooth easing in between. A non-positive radius
/// yields zero weight everywhere.
#[inline]
pub fn impact_weight(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    1.0 - smoothstep(0.0, 1.0, distance / radius)
}
