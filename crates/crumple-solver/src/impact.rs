//! Collision → plastic deformation operator.
//!
//! Contacts whose impulse exceeds the plastic yield permanently dent
//! the cage: affected vertices are translated along the contact normal
//! and optionally hinge-bent about the mirror axis, with both effects
//! written into rest *and* current positions. Mutating the rest shape
//! is what makes the dent plastic — the relaxation solver then treats
//! the dented shape as the new equilibrium.

use crumple_math::axis::{hinge_rotate, side_sign};
use crumple_math::falloff::impact_weight;
use crumple_region::contact::resolve_region;
use crumple_region::{ContactEvent, RegionDescriptor, RegionMap};
use crumple_types::constants::IMPACT_VELOCITY_DAMP;
use crumple_types::RegionId;

use crate::config::DeformerConfig;
use crate::state::DeformState;

/// Result of applying one contact event.
#[derive(Debug, Clone, Default)]
pub struct ImpactOutcome {
    /// Per-resolved-point: struck region and number of dented vertices.
    pub applied: Vec<(RegionId, u32)>,
    /// Collider transform ids that matched no region.
    pub skipped_colliders: Vec<u32>,
    /// Impulse excess over the yield threshold (zero if elastic).
    pub over_yield: f32,
}

/// Apply a contact event to the deformation state.
///
/// Events at or below `plastic_yield` are the elastic-only regime and
/// leave the state untouched. Contacts that resolve to no region are
/// skipped — ground strikes and debris are expected, not errors. May
/// be called multiple times per fixed step.
pub fn apply_contact(
    state: &mut DeformState,
    regions: &[RegionDescriptor],
    map: &RegionMap,
    config: &DeformerConfig,
    event: &ContactEvent,
) -> ImpactOutcome {
    let mut outcome = ImpactOutcome::default();

    let over = event.impulse - config.plastic_yield;
    if over <= 0.0 {
        return outcome;
    }
    outcome.over_yield = over;

    for point in &event.points {
        let Some(region) = resolve_region(regions, &point.collider) else {
            outcome.skipped_colliders.push(point.collider.id);
            continue;
        };

        let affected = dent_region(state, regions, map, config, region, point, over);
        outcome.applied.push((region, affected));
    }

    outcome
}

/// Dent the vertices of one region around a contact point.
///
/// Returns the number of vertices affected.
fn dent_region(
    state: &mut DeformState,
    regions: &[RegionDescriptor],
    map: &RegionMap,
    config: &DeformerConfig,
    region: RegionId,
    point: &crumple_region::ContactPoint,
    over: f32,
) -> u32 {
    let margin = RegionMap::bounds_margin(config.impact_radius);
    let bounds = regions[region.index()].volume.bounds().expanded(margin);
    let axis = config.mirror_axis_normalized();

    let mut affected = 0u32;

    // Collect first: vertices_of borrows the map, not the state.
    let vertices: Vec<usize> = map.vertices_of(region).collect();

    for i in vertices {
        let p = state.position(i);
        if !bounds.contains(p) {
            continue;
        }

        let distance = (p - point.position).length();
        let t = impact_weight(distance, config.impact_radius);
        if t <= 0.0 {
            continue;
        }

        let side = side_sign(p, axis);

        // Plastic translation along the contact normal, flipped per
        // axis side so impacts push in consistently across the mirror
        // plane. Written to both rest and current: permanent.
        let translation = point.normal * (side * config.plastic_scale * over * t);
        state.set_position(i, state.position(i) + translation);
        state.set_rest_position(i, state.rest_position(i) + translation);

        // Optional hinge bend about the mirror axis.
        if config.enable_bend {
            let angle = side * config.max_bend_angle * t;
            let bent_pos = hinge_rotate(state.position(i), axis, angle);
            let bent_rest = hinge_rotate(state.rest_position(i), axis, angle);
            state.set_position(i, bent_pos);
            state.set_rest_position(i, bent_rest);
        }

        // Damp the affected vertex for stability around new geometry.
        state.vel_x[i] *= IMPACT_VELOCITY_DAMP;
        state.vel_y[i] *= IMPACT_VELOCITY_DAMP;
        state.vel_z[i] *= IMPACT_VELOCITY_DAMP;

        affected += 1;
    }

    affected
}
