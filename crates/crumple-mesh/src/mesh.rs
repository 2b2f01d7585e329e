//! Core cage mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! The solver iterates whole channels in tight per-vertex loops, so
//! keeping channels contiguous keeps those loops cache-friendly.

use serde::{Deserialize, Serialize};

use crumple_math::{Aabb, Vec3};
use crumple_types::{CrumpleError, CrumpleResult};

/// A low-polygon collision/deformation cage mesh in SoA layout.
///
/// Positions are the *published* (currently deformed) shape — the
/// deformer writes into them after each fixed step. Normals and bounds
/// are derived data, refreshed via [`crate::normals::compute_vertex_normals`]
/// and [`CageMesh::recompute_bounds`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CageMesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// X components of vertex normals.
    pub normal_x: Vec<f32>,
    /// Y components of vertex normals.
    pub normal_y: Vec<f32>,
    /// Z components of vertex normals.
    pub normal_z: Vec<f32>,

    // --- Triangle data ---
    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,

    /// Cached world-space bounds, refreshed by `recompute_bounds`.
    pub bounds: Aabb,
}

impl CageMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as a `Vec3`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the normal of vertex `i` as a `Vec3`.
    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            normal_x: Vec::with_capacity(vertex_capacity),
            normal_y: Vec::with_capacity(vertex_capacity),
            normal_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
            bounds: Aabb::new(Vec3::ZERO, Vec3::ZERO),
        }
    }

    /// Refreshes the cached bounds from the current vertex positions.
    pub fn recompute_bounds(&mut self) {
        self.bounds = Aabb::from_points(
            (0..self.vertex_count()).map(|i| self.position(i)),
        );
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    pub fn validate(&self) -> CrumpleResult<()> {
        let n = self.pos_x.len();

        // Check SoA consistency
        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(CrumpleError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(CrumpleError::InvalidMesh(
                "Normal arrays have inconsistent lengths".into(),
            ));
        }

        // Check indices
        if self.indices.len() % 3 != 0 {
            return Err(CrumpleError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(CrumpleError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        // Check for degenerate triangles
        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(CrumpleError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts from host-engine format `[x0, y0, z0, x1, y1, z1, ...]`
    /// to SoA layout. Normals are zeroed; call
    /// [`crate::normals::compute_vertex_normals`] after loading.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> CrumpleResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(CrumpleError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        // Deinterleave positions
        for i in 0..n {
            mesh.pos_x.push(positions[i * 3]);
            mesh.pos_y.push(positions[i * 3 + 1]);
            mesh.pos_z.push(positions[i * 3 + 2]);
        }

        // Initialize normals to zero (recompute later)
        mesh.normal_x.resize(n, 0.0);
        mesh.normal_y.resize(n, 0.0);
        mesh.normal_z.resize(n, 0.0);

        mesh.indices = indices.to_vec();

        mesh.validate()?;
        mesh.recompute_bounds();
        Ok(mesh)
    }
}
