//! A single selectable orientation.

use super::BlockId;
use glam::Quat;
use serde::{Deserialize, Serialize};

/// One selectable orientation: which block record to place and how far to
/// turn its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationDefinition {
    /// Block id that gets placed.
    pub placement_block_id: BlockId,
    /// Visual rotation around the vertical axis, in degrees.
    pub mesh_angle_degrees: f32,
}

impl OrientationDefinition {
    pub fn new(placement_block_id: BlockId, mesh_angle_degrees: f32) -> Self {
        Self {
            placement_block_id,
            mesh_angle_degrees,
        }
    }

    /// Check if this orientation leaves the mesh unrotated.
    pub fn is_identity(&self) -> bool {
        self.mesh_angle_degrees == 0.0
    }

    /// Get the mesh angle in radians.
    pub fn mesh_angle_radians(&self) -> f32 {
        self.mesh_angle_degrees.to_radians()
    }

    /// Mesh rotation as a quaternion around +Y.
    pub fn mesh_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.mesh_angle_radians())
    }
}
