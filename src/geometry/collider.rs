use crate::math::{Transform, Vec3};

use super::aabb::Aabb;
use super::shape::Shape;
use super::support::ConvexSupport;

/// A shape placed in the world.
///
/// This is what the narrow phase sees: the shape answers local support queries and the
/// transform orients and positions them.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    /// Local geometry
    pub shape: Shape,
    /// World placement
    pub transform: Transform,
}

impl Collider {
    /// Creates a collider from a shape and a transform
    pub fn new(shape: Shape, transform: Transform) -> Self {
        Self { shape, transform }
    }

    /// Creates an unrotated collider at `position`
    pub fn at(shape: Shape, position: Vec3) -> Self {
        Self::new(shape, Transform::from_position(position))
    }

    /// Moves the collider by `offset`
    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.transform = self.transform.translated(offset);
    }

    /// Places the collider at `position`, keeping its rotation
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Bounding box in world space
    pub fn world_aabb(&self) -> Aabb {
        self.shape.world_aabb(self.transform)
    }
}

impl ConvexSupport for Collider {
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        let local_dir = self.transform.inverse_transform_vector(direction);
        let local_support = self.shape.support(local_dir);
        self.transform.transform_vector(local_support)
    }

    #[inline]
    fn position(&self) -> Vec3 {
        self.transform.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use std::f32::consts::PI;

    #[test]
    fn test_world_support_adds_position() {
        let collider = Collider::at(Shape::sphere(1.0), Vec3::new(5.0, 0.0, 0.0));

        let support = collider.world_support(Vec3::X);
        assert!((support.x - 6.0).abs() < 1e-5);
        assert!((collider.support(Vec3::X).x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_box_support() {
        // A long thin box rotated 90 degrees around Z now extends along Y
        let collider = Collider::new(
            Shape::cuboid(Vec3::new(3.0, 0.5, 0.5)),
            Transform::from_rotation(Quat::from_axis_angle(Vec3::Z, PI / 2.0)),
        );

        let support = collider.support(Vec3::Y);
        assert!((support.y - 3.0).abs() < 1e-5);
        let support = collider.support(Vec3::X);
        assert!((support.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_translate_and_set_position() {
        let mut collider = Collider::at(Shape::cuboid(Vec3::ONE), Vec3::ZERO);
        collider.translate(Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(collider.position(), Vec3::new(1.0, 2.0, 0.0));

        collider.set_position(Vec3::Z);
        let aabb = collider.world_aabb();
        assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 2.0));
    }
}
