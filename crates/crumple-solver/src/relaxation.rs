//! Spring-damper relaxation passes.
//!
//! Three passes per fixed step, in order: edge springs (repeated for
//! the configured iteration count), rest-position pinning, and
//! integration with displacement clamping. Forces act directly on
//! vertex velocities; each edge applies equal and opposite impulses,
//! so the spring pass conserves momentum per edge.

use crumple_math::Vec3;
use crumple_mesh::topology::EdgeGraph;
use crumple_types::constants::CLAMP_VELOCITY_BLEED;

use crate::state::DeformState;

/// Near-zero length guard for the edge direction division.
const MIN_EDGE_LENGTH: f32 = 1e-5;

/// Outcome of the integration pass.
#[derive(Debug, Clone, Default)]
pub struct IntegrateStats {
    /// Vertices whose displacement from rest was clamped.
    pub clamped: u32,
    /// Vertices whose velocity went non-finite and was reset to zero.
    pub reset_vertices: Vec<u32>,
}

/// One spring-damper iteration over all edges.
///
/// For each edge: the stretch relative to the captured rest length and
/// the closing speed along the edge direction produce a scalar force
/// `k·stretch + c·closing`, applied as opposite velocity impulses to
/// the two endpoints. Degenerate edges are skipped.
pub fn relax_springs(state: &mut DeformState, edges: &EdgeGraph, k: f32, c: f32) {
    for edge in edges.edges() {
        let a = edge.a as usize;
        let b = edge.b as usize;

        let delta = state.position(b) - state.position(a);
        let len = delta.length();
        if len < MIN_EDGE_LENGTH || edge.rest_length < MIN_EDGE_LENGTH {
            continue;
        }
        let dir = delta / len;

        let stretch = len - edge.rest_length;
        let closing = (state.velocity(b) - state.velocity(a)).dot(dir);
        let force = k * stretch + c * closing;

        let impulse = dir * force;
        let va = state.velocity(a) + impulse;
        let vb = state.velocity(b) - impulse;
        state.vel_x[a] = va.x;
        state.vel_y[a] = va.y;
        state.vel_z[a] = va.z;
        state.vel_x[b] = vb.x;
        state.vel_y[b] = vb.y;
        state.vel_z[b] = vb.z;
    }
}

/// Pull every vertex's velocity toward its rest position.
///
/// Pinning targets the rest positions, which plastic events themselves
/// modify, so permanent dents persist while elastic drift does not.
pub fn apply_pin(state: &mut DeformState, pin_strength: f32, dt: f32) {
    let gain = pin_strength * dt;
    for i in 0..state.vertex_count {
        state.vel_x[i] += (state.rest_x[i] - state.pos_x[i]) * gain;
        state.vel_y[i] += (state.rest_y[i] - state.pos_y[i]) * gain;
        state.vel_z[i] += (state.rest_z[i] - state.pos_z[i]) * gain;
    }
}

/// Advance positions by velocity and clamp displacement from rest.
///
/// Non-finite velocities (solver blow-up) are reset to zero before
/// integration. A vertex pushed beyond `max_displacement` is pulled
/// back onto the clamp sphere and its velocity is scaled down to bleed
/// the excess energy.
pub fn integrate(state: &mut DeformState, dt: f32, max_displacement: f32) -> IntegrateStats {
    let mut stats = IntegrateStats::default();

    for i in 0..state.vertex_count {
        let v = state.velocity(i);
        let v = if v.is_finite() {
            v
        } else {
            stats.reset_vertices.push(i as u32);
            state.vel_x[i] = 0.0;
            state.vel_y[i] = 0.0;
            state.vel_z[i] = 0.0;
            Vec3::ZERO
        };

        let mut p = state.position(i) + v * dt;

        let disp = p - state.rest_position(i);
        let dist = disp.length();
        if dist > max_displacement {
            p = state.rest_position(i) + disp * (max_displacement / dist);
            state.vel_x[i] *= CLAMP_VELOCITY_BLEED;
            state.vel_y[i] *= CLAMP_VELOCITY_BLEED;
            state.vel_z[i] *= CLAMP_VELOCITY_BLEED;
            stats.clamped += 1;
        }

        state.set_position(i, p);
    }

    stats
}
