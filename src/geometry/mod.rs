mod aabb;
mod collider;
mod hitbox;
mod shape;
mod support;

pub use aabb::Aabb;
pub use collider::Collider;
pub use hitbox::Hitbox;
pub use shape::{BoxShape, ConvexHull, Plane, Shape, Sphere};
pub use support::{minkowski_support, ConvexSupport, SupportPoint};
