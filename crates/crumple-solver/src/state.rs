//! Deformation state — SoA buffers for all per-vertex data.
//!
//! This is the primary mutable data structure during simulation.
//! The solver reads and writes these buffers each fixed step; the
//! `CageDeformer` owns the single instance, which is what enforces the
//! one-exclusive-writer rule.

use crumple_math::Vec3;
use crumple_mesh::CageMesh;

/// SoA deformation state buffers.
///
/// Three position sets per vertex:
/// - *rest* — the undeformed reference shape, mutated only by plastic
///   impacts;
/// - *current* — the live, possibly elastically-displaced shape,
///   published to the mesh after each step;
/// - *velocity* — solver-owned relaxation state.
///
/// # Layout
///
/// All arrays have length `vertex_count`. Channels are stored
/// contiguously:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
pub struct DeformState {
    /// Number of vertices.
    pub vertex_count: usize,

    // ─── Rest position (plastic reference) ───
    pub rest_x: Vec<f32>,
    pub rest_y: Vec<f32>,
    pub rest_z: Vec<f32>,

    // ─── Position (current) ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,
}

impl DeformState {
    /// Initialize deformation state from a mesh.
    ///
    /// Rest and current positions both start at the mesh's vertex
    /// positions; velocities start at zero.
    pub fn from_mesh(mesh: &CageMesh) -> Self {
        let n = mesh.vertex_count();
        Self {
            vertex_count: n,
            rest_x: mesh.pos_x.clone(),
            rest_y: mesh.pos_y.clone(),
            rest_z: mesh.pos_z.clone(),
            pos_x: mesh.pos_x.clone(),
            pos_y: mesh.pos_y.clone(),
            pos_z: mesh.pos_z.clone(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
        }
    }

    /// Current position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Rest position of vertex `i`.
    #[inline]
    pub fn rest_position(&self, i: usize) -> Vec3 {
        Vec3::new(self.rest_x[i], self.rest_y[i], self.rest_z[i])
    }

    /// Velocity of vertex `i`.
    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    /// Sets the current position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Sets the rest position of vertex `i`. Only the plastic operator
    /// should call this.
    #[inline]
    pub fn set_rest_position(&mut self, i: usize, p: Vec3) {
        self.rest_x[i] = p.x;
        self.rest_y[i] = p.y;
        self.rest_z[i] = p.z;
    }

    /// Elastic displacement of vertex `i` from its rest position.
    #[inline]
    pub fn displacement(&self, i: usize) -> Vec3 {
        self.position(i) - self.rest_position(i)
    }

    /// Permanent dent of vertex `i`: how far its rest position has
    /// moved from the original mesh.
    pub fn dent(&self, i: usize, original: &CageMesh) -> f32 {
        (self.rest_position(i) - original.position(i)).length()
    }

    /// Largest elastic displacement across all vertices.
    pub fn max_displacement(&self) -> f32 {
        (0..self.vertex_count)
            .map(|i| self.displacement(i).length())
            .fold(0.0f32, f32::max)
    }

    /// Copy current positions into the mesh's vertex buffer.
    ///
    /// The caller refreshes normals and bounds afterwards.
    pub fn publish_to(&self, mesh: &mut CageMesh) {
        mesh.pos_x.copy_from_slice(&self.pos_x);
        mesh.pos_y.copy_from_slice(&self.pos_y);
        mesh.pos_z.copy_from_slice(&self.pos_z);
    }
}
