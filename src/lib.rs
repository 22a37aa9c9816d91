//! # Convexity
//!
//! Collision detection between convex shapes, for games that keep a moving body out of static
//! level geometry.
//!
//! ## Features
//!
//! - **Intersection**: GJK over the Minkowski difference, returning the enclosing simplex
//! - **Penetration**: EPA on that simplex, returning normal, depth and contact points
//! - **Continuous collision**: swept AABB time of impact for fast axis-aligned movers
//! - **Collision Shapes**: Sphere, Box, Plane and Convex Hull, or anything implementing
//!   [`ConvexSupport`](geometry::ConvexSupport)
//! - **Resolver**: a [`World`] of static geometry that pushes bodies out and slides hitboxes
//!
//! ## Quick Start
//!
//! ```rust
//! use convexity::prelude::*;
//!
//! let wall = Collider::at(Shape::cuboid(Vec3::ONE), Vec3::ZERO);
//! let mut player = Collider::at(Shape::cuboid(Vec3::ONE), Vec3::new(1.5, 0.0, 0.0));
//!
//! if let Some(contact) = penetration(&player, &wall) {
//!     player.translate(contact.correction());
//! }
//! assert!(!intersects(&player, &wall));
//!
//! // Or let a world of statics do it
//! let mut world = World::default();
//! world.add_static(wall);
//! let mut crate_box = Collider::at(Shape::cuboid(Vec3::splat(0.5)), Vec3::new(0.0, 1.2, 0.0));
//! let correction = world.resolve(&mut crate_box);
//! assert!(correction.y > 0.29);
//! assert!(world.contacts(&crate_box).is_empty());
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
mod world;

pub use config::{CollisionConfig, EpaConfig, GjkConfig};
pub use error::{ConfigError, ShapeError};
pub use world::{ColliderHandle, Contact, HitboxHandle, SweepMode, World, WorldConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{
        epa, gjk, intersects, penetration, swept_aabb, Penetration, Simplex, SweepHit,
    };
    pub use crate::config::{CollisionConfig, EpaConfig, GjkConfig};
    pub use crate::geometry::{Aabb, Collider, ConvexSupport, Hitbox, Shape};
    pub use crate::math::{Quat, Transform, Vec3};
    pub use crate::world::{Contact, World, WorldConfig};
}
