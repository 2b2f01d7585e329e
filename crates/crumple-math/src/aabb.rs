//! Axis-aligned bounding box.
//!
//! Used for mesh bounds publication and as the prefilter volume in
//! region assignment and impact gathering.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The smallest box containing the given points.
    ///
    /// Returns a degenerate box at the origin for an empty slice.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;
        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }
        if any {
            Self { min, max }
        } else {
            Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            }
        }
    }

    /// Returns this box grown by `amount` on every face.
    #[inline]
    pub fn expanded(&self, amount: f32) -> Self {
        let pad = Vec3::splat(amount);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Whether the point lies inside the box (inclusive of faces).
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// The box center.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Closest point inside the box to `p` (the point itself if inside).
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }
}
