//! Vector math.
//!
//! Vectors and rotations come from [`glam`]; this module only adds the rigid [`Transform`]
//! that places a shape in the world.

mod transform;

pub use glam::{Mat3, Quat, Vec2, Vec3};
pub use transform::Transform;

/// Common math constants
pub mod consts {
    /// Squared-length threshold below which a direction is treated as zero
    pub const EPSILON: f32 = 1e-10;
}
