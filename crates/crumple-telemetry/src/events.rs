//! Simulation event types.
//!
//! Structured events emitted at various points in each fixed step.
//! Events are lightweight value types that carry just enough data to
//! be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

use crumple_types::{LinkId, RegionId, VertexId};

/// A simulation event emitted by the engine.
///
/// Events are tagged with a fixed-step index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Fixed-step number (0-indexed).
    pub step: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Fixed step started.
    StepBegin {
        /// Timestep length for this step (seconds).
        dt: f32,
    },

    /// Fixed step completed.
    StepEnd {
        /// Maximum elastic displacement from rest after the step (meters).
        max_displacement: f32,
        /// Number of vertices whose displacement was clamped this step.
        clamped_vertices: u32,
    },

    /// A plastic impact was applied to a region.
    PlasticImpact {
        /// Index of the struck region.
        region: RegionId,
        /// Resolved impulse magnitude (N·s).
        impulse: f32,
        /// Impulse excess over the plastic yield threshold.
        over_yield: f32,
        /// Number of vertices permanently displaced.
        affected_vertices: u32,
    },

    /// A contact event could not be mapped to a region and was skipped.
    ContactSkipped {
        /// Transform id of the unmatched collider.
        collider_id: u32,
    },

    /// A vertex velocity went non-finite and was reset to zero.
    VelocityReset {
        /// Index of the recovered vertex.
        vertex: VertexId,
    },

    /// A joint link exceeded its stress threshold this step.
    LinkYield {
        /// Index of the link.
        link: LinkId,
        /// World-space anchor separation (meters).
        separation: f32,
        /// Accumulated offset magnitude after the shift (meters).
        offset_magnitude: f32,
    },

    /// Accumulated joint offsets were baked into the bone hierarchy.
    BakeCommitted {
        /// Number of links with a nonzero offset at bake time.
        baked_links: u32,
        /// Largest offset magnitude committed (meters).
        max_offset: f32,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u32, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
