//! Push-out example
//!
//! A crate dropped into a floor and a pillar is pushed back out with GJK/EPA, then a player
//! hitbox walks into a wall and slides along it with the swept test.

use convexity::math::Vec2;
use convexity::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use simplelog::LevelFilter::{Off, Trace};
    simplelog::TermLogger::init(
        Trace,
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    println!("Convexity - Push-out Example");
    println!("============================\n");

    let mut world = World::new(WorldConfig::default().with_max_resolve_passes(8))?;
    world.add_static(Collider::at(Shape::plane(Vec2::splat(20.0)), Vec3::ZERO));
    world.add_static(Collider::at(Shape::cuboid(Vec3::ONE), Vec3::new(3.0, 1.0, 0.0)));
    println!("Floor at Y=0, pillar spanning X=2..4\n");

    let mut crate_box = Collider::new(
        Shape::cuboid(Vec3::splat(0.5)),
        Transform::new(Vec3::new(1.8, 0.3, 0.0), Quat::from_rotation_y(0.3)),
    );

    for contact in world.contacts(&crate_box) {
        println!(
            "Overlap with static {}: depth {:.3} along ({:.3}, {:.3}, {:.3})",
            contact.handle.0,
            contact.penetration.depth,
            contact.penetration.normal.x,
            contact.penetration.normal.y,
            contact.penetration.normal.z
        );
    }

    let correction = world.resolve(&mut crate_box);
    let pos = crate_box.transform.position;
    println!(
        "Corrected by ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})\n",
        correction.x, correction.y, correction.z, pos.x, pos.y, pos.z
    );

    world.add_static_hitbox(Hitbox::new(Vec3::new(4.0, 0.0, -5.0), Vec3::new(1.0, 2.0, 10.0)));
    let mut player = Hitbox::new(Vec3::ZERO, Vec3::new(0.6, 1.8, 0.6))
        .with_velocity(Vec3::new(1.5, 0.0, 0.5));

    for frame in 0..6 {
        let hit = world.sweep(&mut player);
        let pos = player.position;
        match hit {
            Some(hit) => println!(
                "frame {frame}: hit at t={:.2}, normal ({}, {}, {}), now at ({:.2}, {:.2}, {:.2})",
                hit.time, hit.normal.x, hit.normal.y, hit.normal.z, pos.x, pos.y, pos.z
            ),
            None => println!(
                "frame {frame}: free, now at ({:.2}, {:.2}, {:.2})",
                pos.x, pos.y, pos.z
            ),
        }
    }

    Ok(())
}
