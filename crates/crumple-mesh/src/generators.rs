//! Procedural mesh generators for tests and demo scenarios.
//!
//! These generators produce deterministic, resolution-configurable
//! meshes with correct winding order.

use crumple_math::Vec3;

use crate::mesh::CageMesh;
use crate::normals::compute_vertex_normals;

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]`
/// in Y, centered at the origin at Z=0.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1). Must be ≥ 1.
/// - `rows` — Number of quads along Y (vertex count = rows + 1). Must be ≥ 1.
/// - `width` — Total width in meters.
/// - `height` — Total height in meters.
///
/// # Example
/// ```
/// use crumple_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> CageMesh {
    assert!(
        cols >= 1 && rows >= 1,
        "quad_grid requires at least one quad per axis"
    );

    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let vertex_count = verts_x * verts_y;
    let tri_count = cols * rows * 2;

    let mut mesh = CageMesh::with_capacity(vertex_count, tri_count);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    // Generate vertices
    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;

            mesh.pos_x.push(-half_w + u * width);
            mesh.pos_y.push(half_h - v * height); // Top to bottom
            mesh.pos_z.push(0.0);

            mesh.normal_x.push(0.0);
            mesh.normal_y.push(0.0);
            mesh.normal_z.push(1.0); // Facing +Z
        }
    }

    // Generate triangles (two per quad)
    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            // Upper-left triangle
            mesh.indices.push(top_left);
            mesh.indices.push(bot_left);
            mesh.indices.push(top_right);

            // Lower-right triangle
            mesh.indices.push(top_right);
            mesh.indices.push(bot_left);
            mesh.indices.push(bot_right);
        }
    }

    mesh.recompute_bounds();
    mesh
}

/// Generates a closed axis-aligned box shell centered at `center`.
///
/// Eight vertices, twelve triangles, outward winding. This is the
/// typical shape of one low-poly cage segment (a fuselage section,
/// a wing panel).
pub fn box_panel(center: Vec3, half_extents: Vec3) -> CageMesh {
    let mut mesh = CageMesh::with_capacity(8, 12);

    for &sz in &[-1.0f32, 1.0] {
        for &sy in &[-1.0f32, 1.0] {
            for &sx in &[-1.0f32, 1.0] {
                mesh.pos_x.push(center.x + sx * half_extents.x);
                mesh.pos_y.push(center.y + sy * half_extents.y);
                mesh.pos_z.push(center.z + sz * half_extents.z);
                mesh.normal_x.push(0.0);
                mesh.normal_y.push(0.0);
                mesh.normal_z.push(0.0);
            }
        }
    }

    // Vertex numbering: bit 0 = +X, bit 1 = +Y, bit 2 = +Z.
    #[rustfmt::skip]
    const FACES: [[u32; 4]; 6] = [
        [1, 3, 7, 5], // +X
        [0, 4, 6, 2], // -X
        [2, 6, 7, 3], // +Y
        [0, 1, 5, 4], // -Y
        [4, 5, 7, 6], // +Z
        [0, 2, 3, 1], // -Z
    ];

    for [a, b, c, d] in FACES {
        mesh.indices.extend_from_slice(&[a, b, c]);
        mesh.indices.extend_from_slice(&[a, c, d]);
    }

    compute_vertex_normals(&mut mesh);
    mesh.recompute_bounds();
    mesh
}
