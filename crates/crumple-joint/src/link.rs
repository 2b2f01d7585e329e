//! Joint-link entities.
//!
//! One link represents a dynamic-body-to-proxy connection: the host's
//! 6-DOF joint anchors the dynamic body to a kinematic proxy that
//! tracks a cage bone. The link owns the joint's rest ("connected")
//! anchor and the plastic offset accumulated against it.

use crumple_math::{Quat, Vec3};

/// Authoring-time description of one joint link.
#[derive(Debug, Clone)]
pub struct LinkDescriptor {
    /// Index of the cage bone the proxy tracks.
    pub bone: usize,
    /// Connected-anchor rest point in proxy-local space. Captured as
    /// the base anchor at driver construction.
    pub base_anchor: Vec3,
    /// Whether the proxy follows the bone's position. Rotation is
    /// always followed.
    pub follow_position: bool,
}

/// Runtime state of one joint link.
///
/// Created only at driver construction (links are authored, never
/// spawned at runtime). The accumulated offset lives in proxy-local
/// space and is reset to zero on bake or clear.
#[derive(Debug, Clone)]
pub struct JointLink {
    /// Index of the cage bone the proxy tracks.
    pub bone: usize,
    /// Base connected anchor (proxy-local), captured at construction.
    pub base_anchor: Vec3,
    /// Whether the proxy follows the bone's position.
    pub follow_position: bool,

    /// Kinematic proxy pose.
    pub proxy_position: Vec3,
    pub proxy_rotation: Quat,
    /// Proxy linear velocity, tracked for the bake teleport.
    pub proxy_velocity: Vec3,

    /// Accumulated plastic offset, proxy-local.
    pub offset: Vec3,
    /// Effective connected anchor: `base_anchor + offset`.
    pub connected_anchor: Vec3,
}

impl JointLink {
    /// Builds the runtime link from its descriptor, placing the proxy
    /// at the given initial pose (normally the bone's world pose).
    pub fn from_descriptor(desc: &LinkDescriptor, position: Vec3, rotation: Quat) -> Self {
        Self {
            bone: desc.bone,
            base_anchor: desc.base_anchor,
            follow_position: desc.follow_position,
            proxy_position: position,
            proxy_rotation: rotation,
            proxy_velocity: Vec3::ZERO,
            offset: Vec3::ZERO,
            connected_anchor: desc.base_anchor,
        }
    }

    /// World position of the connected anchor on the proxy.
    #[inline]
    pub fn anchor_world(&self) -> Vec3 {
        self.proxy_position + self.proxy_rotation * self.connected_anchor
    }

    /// World magnitude of the accumulated offset. Rotation preserves
    /// length, so this is just the local magnitude.
    #[inline]
    pub fn dent_magnitude(&self) -> f32 {
        self.offset.length()
    }

    /// Discards the accumulated offset and restores the base anchor.
    pub fn reset_offset(&mut self) {
        self.offset = Vec3::ZERO;
        self.connected_anchor = self.base_anchor;
    }
}
