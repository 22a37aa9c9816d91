use glam::{Mat3, Quat, Vec3};

/// A rigid placement in the world: translation plus rotation.
///
/// Shapes are defined around their local origin; a transform moves that origin to `position`
/// and orients the shape by `rotation`. Scale is not represented.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Position (translation)
    pub position: Vec3,
    /// Rotation (unit quaternion)
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform (no translation or rotation)
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a new transform from position and rotation
    #[inline]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Creates a transform with only translation
    #[inline]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a transform with only rotation
    #[inline]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }

    /// Returns the rotation as a 3x3 matrix
    #[inline]
    pub fn rotation_matrix(self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    /// Transforms a direction from local space to world space.
    /// Directions ignore translation.
    #[inline]
    pub fn transform_vector(self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Transforms a direction from world space to local space
    #[inline]
    pub fn inverse_transform_vector(self, vector: Vec3) -> Vec3 {
        self.rotation.inverse() * vector
    }

    /// Returns this transform moved by `offset`
    #[inline]
    pub fn translated(self, offset: Vec3) -> Self {
        Self {
            position: self.position + offset,
            rotation: self.rotation,
        }
    }
}
