//! Edge-graph extraction from triangle topology.
//!
//! The spring solver operates on the mesh's unique edges, each with a
//! rest length captured at construction time. Edges are deduplicated
//! via canonical `(min, max)` index pairs and degenerate edges (rest
//! length below a squared epsilon) are excluded, since the solver
//! divides by the edge direction's length.

use std::collections::HashSet;

use crumple_types::constants::DEGENERATE_EDGE_EPSILON_SQ;

use crate::mesh::CageMesh;

/// One spring edge: a vertex-index pair plus its captured rest length.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Lower vertex index of the canonical pair.
    pub a: u32,
    /// Higher vertex index of the canonical pair.
    pub b: u32,
    /// Distance between the two rest positions at build time.
    pub rest_length: f32,
}

/// The deduplicated edge set of a cage mesh.
///
/// Immutable after construction. Rebuilt only if the mesh topology
/// itself changes (which the deformer never does).
#[derive(Debug, Clone)]
pub struct EdgeGraph {
    edges: Vec<Edge>,
    /// Edges excluded as degenerate during the build.
    skipped_degenerate: usize,
}

impl EdgeGraph {
    /// Builds the edge graph from a mesh's triangle buffer, capturing
    /// rest lengths from its current vertex positions.
    ///
    /// Each unordered vertex pair appears at most once. Edges whose
    /// squared rest length falls below `DEGENERATE_EDGE_EPSILON_SQ`
    /// are skipped.
    pub fn build(mesh: &CageMesh) -> Self {
        let tri_count = mesh.triangle_count();
        let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(tri_count * 3);
        let mut edges = Vec::with_capacity(tri_count * 3);
        let mut skipped = 0usize;

        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                if !seen.insert(key) {
                    continue;
                }

                let delta = mesh.position(key.1 as usize) - mesh.position(key.0 as usize);
                let len_sq = delta.length_squared();
                if len_sq < DEGENERATE_EDGE_EPSILON_SQ {
                    skipped += 1;
                    continue;
                }

                edges.push(Edge {
                    a: key.0,
                    b: key.1,
                    rest_length: len_sq.sqrt(),
                });
            }
        }

        Self {
            edges,
            skipped_degenerate: skipped,
        }
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// For procedurally-authored spring graphs; no deduplication or
    /// degeneracy filtering is applied.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self {
            edges,
            skipped_degenerate: 0,
        }
    }

    /// The edge list.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges excluded as degenerate during the build.
    #[inline]
    pub fn skipped_degenerate(&self) -> usize {
        self.skipped_degenerate
    }
}
