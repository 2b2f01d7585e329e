//! Vertex-to-region assignment.
//!
//! Built once at initialization (and rebuilt only if the region list
//! changes): each vertex is attributed to the nearest region volume.
//! An expanded-bounds prefilter keeps the common case cheap without
//! changing the result — vertices outside every expanded bound fall
//! back to an unrestricted nearest-volume search, so no vertex is left
//! unassigned unless the region list is empty.

use crumple_mesh::CageMesh;
use crumple_types::constants::{EPSILON, REGION_BOUNDS_PAD};
use crumple_types::RegionId;

use crate::volume::RegionDescriptor;

/// The vertex → region mapping for one cage mesh.
///
/// Deterministic for a fixed mesh and region list.
#[derive(Debug, Clone)]
pub struct RegionMap {
    assignments: Vec<Option<RegionId>>,
}

impl RegionMap {
    /// Margin by which a region volume's bounds are grown for the
    /// assignment prefilter and the impact vertex gather.
    #[inline]
    pub fn bounds_margin(impact_radius: f32) -> f32 {
        2.0 * impact_radius + REGION_BOUNDS_PAD
    }

    /// Assigns every mesh vertex to its nearest region volume.
    ///
    /// Candidates are first restricted to volumes whose bounds —
    /// expanded by [`Self::bounds_margin`] — contain the vertex. On an
    /// exact distance tie a capsule volume wins over a box. If no
    /// expanded bound contains the vertex, all volumes are searched.
    /// An empty region list leaves every vertex unassigned.
    pub fn build(mesh: &CageMesh, regions: &[RegionDescriptor], impact_radius: f32) -> Self {
        let n = mesh.vertex_count();
        let mut assignments = vec![None; n];

        if regions.is_empty() {
            return Self { assignments };
        }

        let margin = Self::bounds_margin(impact_radius);
        let expanded: Vec<_> = regions
            .iter()
            .map(|r| r.volume.bounds().expanded(margin))
            .collect();

        for i in 0..n {
            let p = mesh.position(i);

            let filtered = nearest_region(
                regions
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| expanded[*idx].contains(p)),
                p,
            );

            // Prefilter missed everything: search unrestricted.
            let chosen =
                filtered.or_else(|| nearest_region(regions.iter().enumerate(), p));

            assignments[i] = chosen;
        }

        Self { assignments }
    }

    /// The region a vertex belongs to, or `None` if unassigned.
    #[inline]
    pub fn region_of(&self, vertex: usize) -> Option<RegionId> {
        self.assignments.get(vertex).copied().flatten()
    }

    /// Iterator over the vertex indices owned by `region`.
    pub fn vertices_of(&self, region: RegionId) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == Some(region))
            .map(|(i, _)| i)
    }

    /// Number of vertices in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of vertices without a region.
    pub fn unassigned_count(&self) -> usize {
        self.assignments.iter().filter(|r| r.is_none()).count()
    }
}

/// Nearest region among `candidates` by surface distance, preferring a
/// capsule over a non-capsule on a numerically equal distance.
fn nearest_region<'a>(
    candidates: impl Iterator<Item = (usize, &'a RegionDescriptor)>,
    p: crumple_math::Vec3,
) -> Option<RegionId> {
    let mut best: Option<(usize, f32, bool)> = None;

    for (idx, region) in candidates {
        let d = region.volume.surface_distance(p);
        let is_capsule = region.volume.is_capsule();

        let better = match best {
            None => true,
            Some((_, best_d, best_capsule)) => {
                if (d - best_d).abs() <= EPSILON {
                    // Exact tie: capsule beats non-capsule.
                    is_capsule && !best_capsule
                } else {
                    d < best_d
                }
            }
        };

        if better {
            best = Some((idx, d, is_capsule));
        }
    }

    best.map(|(idx, _, _)| RegionId(idx as u16))
}
