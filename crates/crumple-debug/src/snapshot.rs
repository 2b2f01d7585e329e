//! State snapshot serialization for replay and debugging.
//!
//! Snapshots capture the deformation state at a point in time —
//! including rest positions, so a snapshot alone is enough to measure
//! which dents are plastic and which are transient elastic sag.

use serde::{Deserialize, Serialize};

use crumple_types::{CrumpleError, CrumpleResult};

/// A complete deformation state snapshot.
///
/// Serialized with `bincode` for compact binary output. Position and
/// velocity buffers are flat interleaved: `[x0, y0, z0, x1, y1, z1, ...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Fixed-step index when this snapshot was taken.
    pub step: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Rest positions (the plastic reference shape).
    pub rest_positions: Vec<f32>,
    /// Current vertex positions.
    pub positions: Vec<f32>,
    /// Vertex velocities.
    pub velocities: Vec<f32>,
    /// Number of vertices.
    pub vertex_count: usize,
}

/// Summary of plastic deformation in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DentReport {
    /// Largest rest-to-current displacement across vertices.
    pub max_elastic: f32,
    /// Number of vertices whose rest position differs from the
    /// original mesh by more than the given tolerance.
    pub dented_vertices: usize,
}

impl StateSnapshot {
    /// Captures a snapshot from SoA channel buffers.
    ///
    /// All nine slices must share one length.
    #[allow(clippy::too_many_arguments)]
    pub fn from_soa(
        step: u32,
        sim_time: f64,
        rest: [&[f32]; 3],
        pos: [&[f32]; 3],
        vel: [&[f32]; 3],
    ) -> Self {
        let n = pos[0].len();
        let mut rest_positions = Vec::with_capacity(n * 3);
        let mut positions = Vec::with_capacity(n * 3);
        let mut velocities = Vec::with_capacity(n * 3);

        for i in 0..n {
            for c in 0..3 {
                rest_positions.push(rest[c][i]);
            }
            for c in 0..3 {
                positions.push(pos[c][i]);
            }
            for c in 0..3 {
                velocities.push(vel[c][i]);
            }
        }

        Self {
            step,
            sim_time,
            rest_positions,
            positions,
            velocities,
            vertex_count: n,
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> CrumpleResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| CrumpleError::Serialization(format!("snapshot encode: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> CrumpleResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| CrumpleError::Serialization(format!("snapshot decode: {e}")))
    }

    /// Rest-to-current displacement magnitude of vertex `i`.
    pub fn elastic_displacement(&self, i: usize) -> f32 {
        let b = i * 3;
        let dx = self.positions[b] - self.rest_positions[b];
        let dy = self.positions[b + 1] - self.rest_positions[b + 1];
        let dz = self.positions[b + 2] - self.rest_positions[b + 2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Summarizes the snapshot against the original (undeformed)
    /// interleaved positions, counting vertices whose rest position
    /// has plastically moved by more than `tolerance`.
    pub fn dent_report(&self, original: &[f32], tolerance: f32) -> DentReport {
        let mut max_elastic = 0.0f32;
        let mut dented = 0usize;

        for i in 0..self.vertex_count {
            max_elastic = max_elastic.max(self.elastic_displacement(i));

            let b = i * 3;
            let dx = self.rest_positions[b] - original[b];
            let dy = self.rest_positions[b + 1] - original[b + 1];
            let dz = self.rest_positions[b + 2] - original[b + 2];
            if (dx * dx + dy * dy + dz * dz).sqrt() > tolerance {
                dented += 1;
            }
        }

        DentReport {
            max_elastic,
            dented_vertices: dented,
        }
    }
}
