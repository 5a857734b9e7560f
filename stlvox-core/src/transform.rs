/// Rigid rotations applied to meshes before voxelization
use nalgebra::Rotation3;

use crate::geometry::Mesh;
use crate::vector::Vec3;

/// Rotation around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn from_degrees(x: f64, y: f64, z: f64) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

pub struct Transform;

impl Transform {
    /// Create a rotation from a rotation state
    pub fn rotation(rotation: &RotationState) -> Rotation3<f64> {
        let rx = Rotation3::new(Vec3::new(rotation.x, 0.0, 0.0));
        let ry = Rotation3::new(Vec3::new(0.0, rotation.y, 0.0));
        let rz = Rotation3::new(Vec3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: X, then Y, then Z
        rz * ry * rx
    }

    /// Rotate a mesh about the origin
    pub fn apply(rotation: &RotationState, mesh: &Mesh) -> Mesh {
        if rotation.is_zero() {
            return mesh.clone();
        }
        mesh.rotated(&Self::rotation(rotation))
    }
}
