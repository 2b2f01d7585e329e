//! Contact event types and contact → region resolution.
//!
//! The host physics engine reports impulse-resolved contact events.
//! Each contact point names the transform of the collider it struck;
//! resolution maps that back to a region by exact identity first, then
//! by an ancestor/descendant relationship. An unresolvable contact is
//! an expected case (ground strikes, debris) and is simply skipped by
//! the caller.

use serde::{Deserialize, Serialize};

use crumple_math::Vec3;
use crumple_types::RegionId;

use crate::volume::{RegionDescriptor, TransformTag};

/// One contact point within a collision event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPoint {
    /// Contact position, in the cage frame.
    pub position: Vec3,
    /// Contact normal (unit vector, pointing out of the struck surface).
    pub normal: Vec3,
    /// Identity of the collider transform that was struck.
    pub collider: TransformTag,
}

/// An impulse-resolved collision event from the host physics engine.
///
/// Ephemeral: consumed immediately by the plastic operator, never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactEvent {
    /// Resolved impulse magnitude for the whole event (N·s).
    pub impulse: f32,
    /// Contact points reported for the event.
    pub points: Vec<ContactPoint>,
}

impl ContactEvent {
    /// Creates an event.
    pub fn new(impulse: f32, points: Vec<ContactPoint>) -> Self {
        Self { impulse, points }
    }
}

/// Resolves the region a contact collider belongs to.
///
/// First pass: exact transform-id match against the region list, in
/// order. Second pass: ancestor/descendant relationship. Returns `None`
/// if the collider maps to no region.
pub fn resolve_region(
    regions: &[RegionDescriptor],
    collider: &TransformTag,
) -> Option<RegionId> {
    for (idx, region) in regions.iter().enumerate() {
        if region.transform.id == collider.id {
            return Some(RegionId(idx as u16));
        }
    }
    for (idx, region) in regions.iter().enumerate() {
        if region.transform.is_related(collider) {
            return Some(RegionId(idx as u16));
        }
    }
    None
}
