use approx::assert_abs_diff_eq;
use rstest::rstest;

use convexity::collision::{epa, gjk, penetration, swept_aabb, swept_aabb_3d};
use convexity::geometry::{Collider, Hitbox, Shape};
use convexity::math::{Quat, Transform, Vec2, Vec3};
use convexity::World;

fn unit_box(position: Vec3) -> Collider {
    Collider::at(Shape::cuboid(Vec3::ONE), position)
}

#[rstest]
#[case::apart_on_x(Vec3::new(3.0, 0.0, 0.0))]
#[case::apart_on_y(Vec3::new(0.0, -2.1, 0.0))]
#[case::apart_on_z(Vec3::new(0.0, 0.0, 4.0))]
#[case::apart_diagonally(Vec3::new(2.5, 2.5, 2.5))]
fn separated_boxes_do_not_intersect(#[case] offset: Vec3) {
    assert!(gjk(&unit_box(Vec3::ZERO), &unit_box(offset)).is_none());
}

#[test]
fn overlapping_boxes_penetrate_along_x() {
    let a = unit_box(Vec3::ZERO);
    let b = unit_box(Vec3::new(1.5, 0.0, 0.0));

    let simplex = gjk(&a, &b).expect("boxes overlap");
    assert_eq!(simplex.len(), 4);

    let contact = epa(&a, &b, &simplex).expect("EPA converges");
    assert_abs_diff_eq!(contact.depth, 0.5, epsilon = 0.002);
    assert_abs_diff_eq!(contact.normal.dot(Vec3::X).abs(), 1.0, epsilon = 1e-3);
}

#[rstest]
#[case::from_positive_x(Vec3::new(1.5, 0.0, 0.0), Vec3::NEG_X)]
#[case::from_negative_x(Vec3::new(-1.5, 0.0, 0.0), Vec3::X)]
#[case::from_above(Vec3::new(0.0, 1.7, 0.0), Vec3::NEG_Y)]
#[case::from_behind(Vec3::new(0.0, 0.0, -1.6), Vec3::Z)]
fn penetration_normal_points_away_from_other(#[case] other: Vec3, #[case] expected: Vec3) {
    let contact = penetration(&unit_box(Vec3::ZERO), &unit_box(other)).expect("boxes overlap");
    assert_abs_diff_eq!(contact.normal, expected, epsilon = 2e-3);
    assert_abs_diff_eq!(contact.depth, 2.0 - other.length() + 0.001, epsilon = 2e-3);
}

#[test]
fn rotated_box_on_floor() {
    let floor = Collider::at(Shape::cuboid(Vec3::new(5.0, 0.5, 5.0)), Vec3::new(0.0, -0.5, 0.0));
    // Turned 45 degrees about Y the box keeps its flat bottom
    let crate_box = Collider::new(
        Shape::cuboid(Vec3::splat(0.5)),
        Transform::new(
            Vec3::new(0.0, 0.4, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
        ),
    );

    let contact = penetration(&crate_box, &floor).expect("box sinks into the floor");
    assert_abs_diff_eq!(contact.normal, Vec3::Y, epsilon = 2e-3);
    assert_abs_diff_eq!(contact.depth, 0.101, epsilon = 2e-3);
}

#[test]
fn swept_exact_contact_is_free() {
    let moving = Hitbox::new(Vec3::ZERO, Vec3::ONE).with_velocity(Vec3::new(1.0, 0.0, 0.0));
    let fixed = Hitbox::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);

    let mut normal = Vec3::ZERO;
    assert_eq!(swept_aabb(&moving, &fixed, &mut normal), 1.0);
}

#[test]
fn swept_mid_frame_collision() {
    let moving = Hitbox::new(Vec3::ZERO, Vec3::ONE).with_velocity(Vec3::new(2.0, 0.0, 0.0));
    let fixed = Hitbox::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);

    let mut normal = Vec3::ZERO;
    assert_eq!(swept_aabb(&moving, &fixed, &mut normal), 0.5);
    assert_eq!(normal, Vec3::new(-1.0, 0.0, 0.0));
}

#[rstest]
#[case::falling(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -4.0, 0.0), 0.5, Vec3::Y)]
#[case::rising(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, 8.0, 0.0), 0.25, Vec3::NEG_Y)]
fn swept_3d_vertical_impact(
    #[case] start: Vec3,
    #[case] velocity: Vec3,
    #[case] time: f32,
    #[case] normal: Vec3,
) {
    let moving = Hitbox::new(start, Vec3::ONE).with_velocity(velocity);
    let fixed = Hitbox::new(Vec3::ZERO, Vec3::ONE);

    let hit = swept_aabb_3d(&moving, &fixed);
    assert_eq!(hit.time, time);
    assert_eq!(hit.normal, normal);
}

#[test]
fn world_keeps_body_on_floor() {
    let mut world = World::default();
    world.add_static(Collider::at(Shape::plane(Vec2::splat(20.0)), Vec3::ZERO));
    world.add_static(unit_box(Vec3::new(3.0, 1.0, 0.0)));

    // Half sunk into the floor and clipping the pillar
    let mut body = Collider::at(Shape::cuboid(Vec3::splat(0.5)), Vec3::new(1.8, 0.3, 0.0));
    world.resolve(&mut body);

    assert!(world.contacts(&body).is_empty());
    let position = body.transform.position;
    assert!(position.y >= 0.5, "lifted out of the floor: {position}");
    assert!(position.x <= 1.5, "pushed out of the pillar: {position}");
}
