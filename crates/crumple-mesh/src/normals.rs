//! Vertex normal computation from triangle mesh data.
//!
//! Computes area-weighted vertex normals by accumulating
//! face normals from each adjacent triangle. Called after every
//! solver step so the published mesh renders correctly.

use crate::mesh::CageMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle's face normal (weighted by its area) is accumulated
/// at each vertex, then normalized. Modifies the mesh's `normal_x`,
/// `normal_y`, `normal_z` arrays in place.
pub fn compute_vertex_normals(mesh: &mut CageMesh) {
    let n = mesh.vertex_count();

    // Zero out normals
    for i in 0..n {
        mesh.normal_x[i] = 0.0;
        mesh.normal_y[i] = 0.0;
        mesh.normal_z[i] = 0.0;
    }

    // Accumulate area-weighted face normals
    let tri_count = mesh.triangle_count();
    for t in 0..tri_count {
        let [ia, ib, ic] = mesh.triangle(t);
        let a = ia as usize;
        let b = ib as usize;
        let c = ic as usize;

        // Edge vectors
        let e1x = mesh.pos_x[b] - mesh.pos_x[a];
        let e1y = mesh.pos_y[b] - mesh.pos_y[a];
        let e1z = mesh.pos_z[b] - mesh.pos_z[a];

        let e2x = mesh.pos_x[c] - mesh.pos_x[a];
        let e2y = mesh.pos_y[c] - mesh.pos_y[a];
        let e2z = mesh.pos_z[c] - mesh.pos_z[a];

        // Cross product (area-weighted normal, magnitude = 2 × triangle area)
        let nx = e1y * e2z - e1z * e2y;
        let ny = e1z * e2x - e1x * e2z;
        let nz = e1x * e2y - e1y * e2x;

        // Accumulate at each vertex
        for &v in &[a, b, c] {
            mesh.normal_x[v] += nx;
            mesh.normal_y[v] += ny;
            mesh.normal_z[v] += nz;
        }
    }

    // Normalize
    for i in 0..n {
        let nx = mesh.normal_x[i];
        let ny = mesh.normal_y[i];
        let nz = mesh.normal_z[i];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        if len > 1e-12 {
            let inv = 1.0 / len;
            mesh.normal_x[i] *= inv;
            mesh.normal_y[i] *= inv;
            mesh.normal_z[i] *= inv;
        }
    }
}
