//! Region collision volumes.
//!
//! Volumes are specified in the cage's frame (the host transforms
//! world-space data into this frame before handing it over). The two
//! supported shapes mirror the collider subtypes the cage authoring
//! uses: capsules for fuselage/wing segments, boxes for slab panels.

use serde::{Deserialize, Serialize};

use crumple_math::{Aabb, Vec3};

/// Identity of the host-scene transform a volume or contact collider
/// is attached to, with its ancestor chain (nearest parent first).
///
/// Contact resolution matches on exact id first, then on an
/// ancestor/descendant relationship between tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformTag {
    /// Stable id of the transform node.
    pub id: u32,
    /// Ids of the node's ancestors, nearest parent first.
    pub ancestors: Vec<u32>,
}

impl TransformTag {
    /// Creates a tag with no ancestors.
    pub fn root(id: u32) -> Self {
        Self {
            id,
            ancestors: Vec::new(),
        }
    }

    /// Creates a tag with the given ancestor chain.
    pub fn with_ancestors(id: u32, ancestors: Vec<u32>) -> Self {
        Self { id, ancestors }
    }

    /// Whether `self` and `other` refer to the same node, or one is an
    /// ancestor of the other.
    pub fn is_related(&self, other: &TransformTag) -> bool {
        self.id == other.id
            || self.ancestors.contains(&other.id)
            || other.ancestors.contains(&self.id)
    }
}

/// A region collision volume, tagged by shape.
///
/// The capsule/box distinction matters beyond geometry: on an exact
/// distance tie during vertex assignment, a capsule wins over a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionVolume {
    /// A capsule: segment from `start` to `end`, swept by `radius`.
    Capsule { start: Vec3, end: Vec3, radius: f32 },
    /// An axis-aligned box.
    Box { center: Vec3, half_extents: Vec3 },
}

impl RegionVolume {
    /// Whether this volume is a capsule (assignment tie-break).
    #[inline]
    pub fn is_capsule(&self) -> bool {
        matches!(self, RegionVolume::Capsule { .. })
    }

    /// Bounds of the volume, in the cage frame.
    pub fn bounds(&self) -> Aabb {
        match *self {
            RegionVolume::Capsule { start, end, radius } => {
                Aabb::from_points([start, end]).expanded(radius)
            }
            RegionVolume::Box {
                center,
                half_extents,
            } => Aabb::new(center - half_extents, center + half_extents),
        }
    }

    /// Distance from `p` to the volume's surface.
    ///
    /// Zero for points on or inside the volume, matching the host
    /// engine's closest-point query semantics.
    pub fn surface_distance(&self, p: Vec3) -> f32 {
        match *self {
            RegionVolume::Capsule { start, end, radius } => {
                (segment_distance(p, start, end) - radius).max(0.0)
            }
            RegionVolume::Box {
                center,
                half_extents,
            } => {
                let aabb = Aabb::new(center - half_extents, center + half_extents);
                (p - aabb.closest_point(p)).length()
            }
        }
    }
}

/// One region: a volume plus the transform node it is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    /// The collision volume.
    pub volume: RegionVolume,
    /// Host transform identity, used for contact resolution.
    pub transform: TransformTag,
}

impl RegionDescriptor {
    /// Creates a descriptor.
    pub fn new(volume: RegionVolume, transform: TransformTag) -> Self {
        Self { volume, transform }
    }
}

/// Distance from `p` to the segment `a`–`b`.
fn segment_distance(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}
