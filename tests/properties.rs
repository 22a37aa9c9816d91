use glam::EulerRot;
use proptest::prelude::*;

use convexity::collision::{epa, gjk};
use convexity::geometry::{Aabb, Collider, Shape};
use convexity::math::{Quat, Transform, Vec3};

fn vec3(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn rotation() -> impl Strategy<Value = Quat> {
    let angle = -std::f32::consts::PI..std::f32::consts::PI;
    (angle.clone(), angle.clone(), angle)
        .prop_map(|(a, b, c)| Quat::from_euler(EulerRot::XYZ, a, b, c))
}

/// A rotated box placed somewhere near the origin
fn any_box() -> impl Strategy<Value = Collider> {
    (vec3(0.2..2.0), vec3(-6.0..6.0), rotation()).prop_map(|(half_extents, position, rotation)| {
        Collider::new(Shape::cuboid(half_extents), Transform::new(position, rotation))
    })
}

fn any_convex() -> impl Strategy<Value = Collider> {
    prop_oneof![
        any_box(),
        (0.2f32..2.0, vec3(-6.0..6.0))
            .prop_map(|(radius, position)| Collider::at(Shape::sphere(radius), position)),
    ]
}

fn grown(aabb: Aabb, margin: f32) -> Aabb {
    Aabb::new(aabb.min - Vec3::splat(margin), aabb.max + Vec3::splat(margin))
}

proptest! {
    #[test]
    fn disjoint_bounds_never_intersect(a in any_convex(), b in any_convex()) {
        prop_assume!(!grown(a.world_aabb(), 0.01).intersects(b.world_aabb()));
        prop_assert!(gjk(&a, &b).is_none());
    }

    #[test]
    fn overlapping_boxes_yield_penetration(
        a in any_box(),
        b_half_extents in vec3(0.2..2.0),
        b_rotation in rotation(),
        direction in vec3(-1.0..1.0),
        fraction in 0.0f32..0.95,
    ) {
        prop_assume!(direction.length_squared() > 1e-3);

        // Closer than the sum of the inscribed radii, so the boxes certainly overlap
        let a_half_extents = match &a.shape {
            Shape::Box(b) => b.half_extents,
            _ => unreachable!(),
        };
        let reach = a_half_extents.min_element() + b_half_extents.min_element();
        let offset = direction.normalize() * reach * fraction;
        let b = Collider::new(
            Shape::cuboid(b_half_extents),
            Transform::new(a.transform.position + offset, b_rotation),
        );

        let simplex = gjk(&a, &b);
        prop_assert!(simplex.is_some());
        let simplex = simplex.unwrap();
        prop_assert_eq!(simplex.len(), 4);

        let contact = epa(&a, &b, &simplex);
        prop_assert!(contact.is_some());
        let contact = contact.unwrap();
        prop_assert!(contact.depth > 0.0);
        prop_assert!((contact.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn verdict_is_idempotent(a in any_convex(), b in any_convex()) {
        prop_assert_eq!(gjk(&a, &b), gjk(&a, &b));
    }

    #[test]
    fn arbitrary_hulls_terminate(
        points_a in prop::collection::vec(vec3(-2.0..2.0), 1..16),
        points_b in prop::collection::vec(vec3(-2.0..2.0), 1..16),
        offset in vec3(-3.0..3.0),
    ) {
        // Flat, collinear and single-point hulls included; only termination is checked
        let a = Collider::at(Shape::convex_hull(points_a).unwrap(), Vec3::ZERO);
        let b = Collider::at(Shape::convex_hull(points_b).unwrap(), offset);

        if let Some(simplex) = gjk(&a, &b) {
            prop_assert_eq!(simplex.len(), 4);
            if let Some(contact) = epa(&a, &b, &simplex) {
                prop_assert!(contact.depth > 0.0);
            }
        }
    }
}
