//! The cage bone hierarchy.
//!
//! Bones are the reference geometry the proxies track. Baking a link's
//! accumulated offset permanently moves its bone's local position —
//! the skeleton is the plastic state of this subsystem, the way rest
//! positions are for the vertex deformer.

use crumple_math::{Quat, Vec3};
use crumple_types::{CrumpleError, CrumpleResult};

/// One bone of the cage skeleton.
#[derive(Debug, Clone)]
pub struct CageBone {
    /// Human-readable name, for diagnostics.
    pub name: String,
    /// Parent bone index; `None` for a root bone.
    pub parent: Option<usize>,
    /// Position relative to the parent (or the cage origin for roots).
    pub local_position: Vec3,
    /// Rotation relative to the parent.
    pub local_rotation: Quat,
}

impl CageBone {
    /// Creates a root bone.
    pub fn root(name: impl Into<String>, local_position: Vec3, local_rotation: Quat) -> Self {
        Self {
            name: name.into(),
            parent: None,
            local_position,
            local_rotation,
        }
    }

    /// Creates a child bone.
    pub fn child(
        name: impl Into<String>,
        parent: usize,
        local_position: Vec3,
        local_rotation: Quat,
    ) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            local_position,
            local_rotation,
        }
    }
}

/// A bone hierarchy, parents stored before children.
#[derive(Debug, Clone)]
pub struct CageSkeleton {
    bones: Vec<CageBone>,
}

impl CageSkeleton {
    /// Creates a skeleton, validating that every parent index refers
    /// to an earlier bone (which also rules out cycles).
    pub fn new(bones: Vec<CageBone>) -> CrumpleResult<Self> {
        for (i, bone) in bones.iter().enumerate() {
            if let Some(p) = bone.parent {
                if p >= i {
                    return Err(CrumpleError::InvalidConfig(format!(
                        "bone '{}' ({}) has parent index {} not earlier in the list",
                        bone.name, i, p
                    )));
                }
            }
        }
        Ok(Self { bones })
    }

    /// Number of bones.
    #[inline]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// The bone at `index`.
    #[inline]
    pub fn bone(&self, index: usize) -> &CageBone {
        &self.bones[index]
    }

    /// World pose of a bone: walks the parent chain.
    pub fn world_pose(&self, index: usize) -> (Vec3, Quat) {
        let bone = &self.bones[index];
        match bone.parent {
            None => (bone.local_position, bone.local_rotation),
            Some(p) => {
                let (parent_pos, parent_rot) = self.world_pose(p);
                (
                    parent_pos + parent_rot * bone.local_position,
                    parent_rot * bone.local_rotation,
                )
            }
        }
    }

    /// World rotation of a bone's parent frame (identity for roots).
    pub fn parent_world_rotation(&self, index: usize) -> Quat {
        match self.bones[index].parent {
            None => Quat::IDENTITY,
            Some(p) => self.world_pose(p).1,
        }
    }

    /// Permanently shifts a bone's local position by a world-space
    /// vector, converting it into the bone's parent frame. This is the
    /// commit half of a bake.
    pub fn shift_bone_world(&mut self, index: usize, world_offset: Vec3) {
        let parent_rot = self.parent_world_rotation(index);
        self.bones[index].local_position += parent_rot.inverse() * world_offset;
    }
}
