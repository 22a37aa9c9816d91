use std::sync::Arc;

use crate::error::ShapeError;
use crate::math::{Mat3, Transform, Vec2, Vec3};

use super::aabb::Aabb;

/// A convex collision shape, defined around its local origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A sphere defined by its radius
    Sphere(Sphere),
    /// A box (cuboid) defined by half-extents
    Box(BoxShape),
    /// A finite rectangle lying in the local XZ plane
    Plane(Plane),
    /// An arbitrary convex polytope given by its vertices
    ConvexHull(ConvexHull),
}

impl Shape {
    /// Creates a sphere shape
    #[inline]
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(Sphere::new(radius))
    }

    /// Creates a box shape from half-extents
    #[inline]
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box(BoxShape::new(half_extents))
    }

    /// Creates a box shape from full dimensions
    #[inline]
    pub fn cuboid_from_size(size: Vec3) -> Self {
        Self::Box(BoxShape::from_size(size))
    }

    /// Creates a plane rectangle from its X/Z half-extents
    #[inline]
    pub fn plane(half_extents: Vec2) -> Self {
        Self::Plane(Plane::new(half_extents))
    }

    /// Creates a convex hull from its vertices
    pub fn convex_hull(vertices: impl IntoIterator<Item = Vec3>) -> Result<Self, ShapeError> {
        ConvexHull::new(vertices).map(Self::ConvexHull)
    }

    /// Returns the support point in the given direction (local space)
    #[inline]
    pub fn support(&self, direction: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.support(direction),
            Shape::Box(b) => b.support(direction),
            Shape::Plane(p) => p.support(direction),
            Shape::ConvexHull(h) => h.support(direction),
        }
    }

    /// Computes the AABB of this shape in local space
    pub fn local_aabb(&self) -> Aabb {
        match self {
            Shape::Sphere(s) => Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(s.radius)),
            Shape::Box(b) => Aabb::from_center_half_extents(Vec3::ZERO, b.half_extents),
            Shape::Plane(p) => Aabb::from_center_half_extents(Vec3::ZERO, p.half_extents3()),
            Shape::ConvexHull(h) => Aabb::from_points(h.vertices().iter().copied()),
        }
    }

    /// Computes the AABB of this shape given a world transform
    pub fn world_aabb(&self, transform: Transform) -> Aabb {
        match self {
            Shape::Sphere(s) => {
                Aabb::from_center_half_extents(transform.position, Vec3::splat(s.radius))
            }
            Shape::Box(b) => rotated_box_aabb(b.half_extents, transform),
            Shape::Plane(p) => rotated_box_aabb(p.half_extents3(), transform),
            Shape::ConvexHull(h) => Aabb::from_points(
                h.vertices()
                    .iter()
                    .map(|&vertex| transform.transform_point(vertex)),
            ),
        }
    }
}

/// World AABB of a centered box: sum the absolute rotated axes.
fn rotated_box_aabb(half_extents: Vec3, transform: Transform) -> Aabb {
    let rot = transform.rotation_matrix();
    let abs_rot = Mat3::from_cols(rot.x_axis.abs(), rot.y_axis.abs(), rot.z_axis.abs());
    Aabb::from_center_half_extents(transform.position, abs_rot * half_extents)
}

/// Picks `+h` or `-h` per axis by the sign of the direction.
/// Zero components resolve to the positive side.
#[inline]
fn signed_corner(half_extents: Vec3, direction: Vec3) -> Vec3 {
    Vec3::new(
        if direction.x >= 0.0 { half_extents.x } else { -half_extents.x },
        if direction.y >= 0.0 { half_extents.y } else { -half_extents.y },
        if direction.z >= 0.0 { half_extents.z } else { -half_extents.z },
    )
}

/// A sphere collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given radius
    #[inline]
    pub fn new(radius: f32) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self { radius }
    }

    /// Returns the support point in the given direction
    #[inline]
    pub fn support(&self, direction: Vec3) -> Vec3 {
        direction.normalize() * self.radius
    }
}

/// A box (cuboid) collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    /// Half-extents (half the size in each dimension)
    pub half_extents: Vec3,
}

impl BoxShape {
    /// Creates a new box with the given half-extents
    #[inline]
    pub fn new(half_extents: Vec3) -> Self {
        debug_assert!(half_extents.cmpgt(Vec3::ZERO).all(), "box extents must be positive");
        Self { half_extents }
    }

    /// Creates a box from full size dimensions
    #[inline]
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size * 0.5)
    }

    /// Returns the support point in the given direction
    #[inline]
    pub fn support(&self, direction: Vec3) -> Vec3 {
        signed_corner(self.half_extents, direction)
    }
}

/// A flat rectangle in the local XZ plane, facing +Y.
///
/// It has no volume on its own; against a solid shape the Minkowski difference is still solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Half-extents along X and Z
    pub half_extents: Vec2,
}

impl Plane {
    /// Creates a new plane rectangle
    #[inline]
    pub fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    #[inline]
    fn half_extents3(&self) -> Vec3 {
        Vec3::new(self.half_extents.x, 0.0, self.half_extents.y)
    }

    /// Returns the support point in the given direction
    #[inline]
    pub fn support(&self, direction: Vec3) -> Vec3 {
        signed_corner(self.half_extents3(), direction)
    }
}

/// A convex polytope stored as its vertex cloud.
///
/// Interior points are allowed; they never win a support query.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    vertices: Arc<[Vec3]>,
}

impl ConvexHull {
    /// Creates a hull, rejecting empty or non-finite input
    pub fn new(vertices: impl IntoIterator<Item = Vec3>) -> Result<Self, ShapeError> {
        let vertices: Arc<[Vec3]> = vertices.into_iter().collect();
        if vertices.is_empty() {
            return Err(ShapeError::EmptyHull);
        }
        if let Some((index, &vertex)) = vertices.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ShapeError::NonFiniteVertex { index, vertex });
        }
        Ok(Self { vertices })
    }

    /// Returns the hull's vertices
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns the vertex with the largest projection onto `direction`.
    /// Ties keep the earliest vertex.
    pub fn support(&self, direction: Vec3) -> Vec3 {
        let mut best = self.vertices[0];
        let mut best_dot = best.dot(direction);
        for &vertex in &self.vertices[1..] {
            let d = vertex.dot(direction);
            if d > best_dot {
                best = vertex;
                best_dot = d;
            }
        }
        best
    }
}
