use crate::collision::{swept_aabb_3d, swept_aabb_xz, SweepHit};
use crate::math::Vec3;

/// An axis-aligned box with a per-frame displacement, used by the swept test.
///
/// `position` is the minimum corner and `size` the full extent, so the box spans
/// `position..position + size`. `velocity` is the displacement over one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitbox {
    /// Minimum corner
    pub position: Vec3,
    /// Full extent
    pub size: Vec3,
    /// Displacement per frame
    pub velocity: Vec3,
}

impl Hitbox {
    /// Creates a motionless hitbox
    #[inline]
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            size,
            velocity: Vec3::ZERO,
        }
    }

    /// Sets the per-frame displacement
    #[inline]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.position
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.position + self.size
    }

    /// Moves the box along its velocity by `fraction` of a frame
    #[inline]
    pub fn advance(&mut self, fraction: f32) {
        self.position += self.velocity * fraction;
    }

    /// Time of impact against a static box on the X and Z axes.
    ///
    /// See [`swept_aabb_xz`]; a `time` of `1.0` means the whole frame's motion is free.
    #[inline]
    pub fn sweep(&self, fixed: &Hitbox) -> SweepHit {
        swept_aabb_xz(self, fixed)
    }

    /// Time of impact against a static box on all three axes
    #[inline]
    pub fn sweep_3d(&self, fixed: &Hitbox) -> SweepHit {
        swept_aabb_3d(self, fixed)
    }
}
