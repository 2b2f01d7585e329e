//! Mirror-axis helpers for the plastic-bend operator.
//!
//! Impacts push vertices "inward" relative to a configurable mirror axis
//! in the mesh's local space. Which way is inward depends on which side
//! of the mirror plane a vertex lies on; the hinge bend rotates the
//! axis-perpendicular component of the vertex position about the axis.

use glam::{Quat, Vec3};

/// Sign of the side of the mirror plane `local_pos` lies on.
///
/// Returns +1.0 or -1.0 from the sign of `local_pos · axis`. An exact
/// zero (vertex on the plane) maps to +1.0 — a compatibility contract,
/// not a geometric statement.
#[inline]
pub fn side_sign(local_pos: Vec3, axis: Vec3) -> f32 {
    if local_pos.dot(axis) < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Splits `v` into components parallel and perpendicular to `axis`.
///
/// `axis` must be normalized. Returns `(parallel, perpendicular)` with
/// `parallel + perpendicular == v`.
#[inline]
pub fn decompose(v: Vec3, axis: Vec3) -> (Vec3, Vec3) {
    let parallel = axis * v.dot(axis);
    (parallel, v - parallel)
}

/// Rotates only the axis-perpendicular component of `v` about `axis` by
/// `angle_rad`, leaving the parallel component untouched.
///
/// This models a hinge/twist about the mirror axis rather than a rigid
/// rotation of the whole position.
#[inline]
pub fn hinge_rotate(v: Vec3, axis: Vec3, angle_rad: f32) -> Vec3 {
    let (parallel, perpendicular) = decompose(v, axis);
    let rot = Quat::from_axis_angle(axis, angle_rad);
    parallel + rot * perpendicular
}
