use log::{debug, trace};

use crate::config::{CollisionConfig, EpaConfig};
use crate::geometry::{minkowski_support, ConvexSupport, SupportPoint};
use crate::math::consts::EPSILON;
use crate::math::Vec3;

use super::gjk::{gjk_with_config, Simplex};

/// Minimum translation separating two intersecting shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit separation direction, pointing from B to A.
    /// Translating A by `normal * depth` separates the pair.
    pub normal: Vec3,
    /// Penetration depth, always positive
    pub depth: f32,
    /// Deepest point of A inside B (world space)
    pub point_a: Vec3,
    /// Deepest point of B inside A (world space)
    pub point_b: Vec3,
}

impl Penetration {
    /// The translation that pushes A out of B
    #[inline]
    pub fn correction(&self) -> Vec3 {
        self.normal * self.depth
    }
}

/// A triangular face of the polytope, wound counter-clockwise seen from outside
#[derive(Debug, Clone, Copy)]
struct Face {
    indices: [usize; 3],
    /// Outward unit normal
    normal: Vec3,
    /// Signed distance from the origin to the face plane
    distance: f32,
}

/// Computes the penetration of two intersecting shapes from the GJK simplex, with the default
/// configuration.
///
/// Returns `None` if the simplex is not a tetrahedron or the polytope did not converge within the
/// iteration cap; callers should skip correcting the pair this frame.
pub fn epa<A, B>(a: &A, b: &B, simplex: &Simplex) -> Option<Penetration>
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    epa_with_config(a, b, simplex, &EpaConfig::default())
}

/// Computes the penetration of two intersecting shapes. See [`epa`].
pub fn epa_with_config<A, B>(
    a: &A,
    b: &B,
    simplex: &Simplex,
    config: &EpaConfig,
) -> Option<Penetration>
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    if !simplex.is_tetrahedron() {
        return None;
    }

    let mut vertices: Vec<SupportPoint> = simplex.as_slice().to_vec();
    let mut faces: Vec<Face> = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]]
        .into_iter()
        .filter_map(|indices| create_face(&vertices, indices))
        .collect();
    fix_winding(&vertices, &mut faces);

    for iteration in 1..=config.max_iterations {
        let closest = *faces
            .iter()
            .min_by(|x, y| x.distance.total_cmp(&y.distance))?;

        let support = minkowski_support(a, b, closest.normal);
        let gained = support.point.dot(closest.normal) - closest.distance;

        if gained < config.tolerance {
            trace!("EPA: converged after {iteration} iterations");
            return Some(compute_penetration(&vertices, &closest, config.depth_bias));
        }

        expand(&mut vertices, &mut faces, support);
    }

    debug!(
        "EPA: no convergence within {} iterations, skipping correction",
        config.max_iterations
    );
    None
}

/// Runs GJK and, on intersection, EPA
pub fn penetration<A, B>(a: &A, b: &B) -> Option<Penetration>
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    penetration_with_config(a, b, &CollisionConfig::default())
}

/// Runs GJK and, on intersection, EPA, with explicit settings
pub fn penetration_with_config<A, B>(a: &A, b: &B, config: &CollisionConfig) -> Option<Penetration>
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    let simplex = gjk_with_config(a, b, &config.gjk)?;
    epa_with_config(a, b, &simplex, &config.epa)
}

/// Adds `point` to the polytope: faces it can see are removed and the hole is closed with a fan
/// of new faces around it.
fn expand(vertices: &mut Vec<SupportPoint>, faces: &mut Vec<Face>, point: SupportPoint) {
    let new_index = vertices.len();
    vertices.push(point);
    let vertices: &[SupportPoint] = vertices;

    let mut horizon: Vec<(usize, usize)> = Vec::new();
    faces.retain(|face| {
        let v = vertices[face.indices[0]].point;
        if face.normal.dot(point.point - v) > 0.0 {
            for j in 0..3 {
                add_or_remove_edge(&mut horizon, (face.indices[j], face.indices[(j + 1) % 3]));
            }
            false
        } else {
            true
        }
    });

    faces.extend(
        horizon
            .into_iter()
            .filter_map(|(i, j)| create_face(vertices, [i, j, new_index])),
    );
}

/// Creates a face from three vertex indices, or `None` if they are collinear
fn create_face(vertices: &[SupportPoint], indices: [usize; 3]) -> Option<Face> {
    let a = vertices[indices[0]].point;
    let b = vertices[indices[1]].point;
    let c = vertices[indices[2]].point;

    let normal = (b - a).cross(c - a);
    if normal.length_squared() < EPSILON {
        return None;
    }

    let normal = normal.normalize();
    Some(Face {
        indices,
        normal,
        distance: normal.dot(a),
    })
}

/// Orients the initial faces away from the centroid
fn fix_winding(vertices: &[SupportPoint], faces: &mut [Face]) {
    let centroid = vertices.iter().map(|v| v.point).sum::<Vec3>() / vertices.len() as f32;

    for face in faces.iter_mut() {
        let to_face = vertices[face.indices[0]].point - centroid;
        if face.normal.dot(to_face) < 0.0 {
            face.normal = -face.normal;
            face.distance = -face.distance;
            face.indices.swap(0, 1);
        }
    }
}

/// Tracks the horizon: an edge shared by two removed faces appears in both directions and
/// cancels out.
fn add_or_remove_edge(edges: &mut Vec<(usize, usize)>, edge: (usize, usize)) {
    let reverse = (edge.1, edge.0);
    if let Some(pos) = edges.iter().position(|e| *e == reverse) {
        edges.swap_remove(pos);
    } else {
        edges.push(edge);
    }
}

fn compute_penetration(vertices: &[SupportPoint], face: &Face, depth_bias: f32) -> Penetration {
    let [i, j, k] = face.indices;
    let (a, b, c) = (vertices[i], vertices[j], vertices[k]);

    let bary = barycentric_coordinates(face.normal * face.distance, a.point, b.point, c.point);

    Penetration {
        // The face normal points out of A - B, i.e. from A toward B
        normal: -face.normal,
        depth: face.distance.max(0.0) + depth_bias,
        point_a: a.on_a * bary.x + b.on_a * bary.y + c.on_a * bary.z,
        point_b: a.on_b * bary.x + b.on_b * bary.y + c.on_b * bary.z,
    }
}

/// Barycentric coordinates of `p` with respect to the triangle `abc`
fn barycentric_coordinates(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < EPSILON {
        return Vec3::splat(1.0 / 3.0);
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Vec3::new(1.0 - v - w, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::narrow_phase::gjk::gjk;
    use crate::geometry::{Collider, Shape};
    use crate::math::{Quat, Transform};

    fn cube_at(position: Vec3) -> Collider {
        Collider::at(Shape::cuboid(Vec3::ONE), position)
    }

    #[test]
    fn test_box_box_penetration() {
        let a = cube_at(Vec3::ZERO);
        let b = cube_at(Vec3::new(1.5, 0.0, 0.0));

        let simplex = gjk(&a, &b).expect("boxes overlap");
        let contact = epa(&a, &b, &simplex).expect("EPA converges on boxes");

        assert!((contact.depth - 0.501).abs() < 2e-3);
        // B sits on +X, so A is pushed toward -X
        assert!((contact.normal - Vec3::new(-1.0, 0.0, 0.0)).length() < 2e-3);
    }

    #[test]
    fn test_box_box_contact_points() {
        let a = cube_at(Vec3::ZERO);
        let b = cube_at(Vec3::new(1.5, 0.0, 0.0));

        let contact = penetration(&a, &b).expect("boxes overlap");
        // A's deepest point lies on its +X face, B's on its -X face
        assert!((contact.point_a.x - 1.0).abs() < 1e-2);
        assert!((contact.point_b.x - 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_sphere_sphere_penetration() {
        let a = Collider::at(Shape::sphere(1.0), Vec3::ZERO);
        let b = Collider::at(Shape::sphere(1.0), Vec3::new(1.5, 0.0, 0.0));

        let contact = penetration_with_config(
            &a,
            &b,
            &CollisionConfig {
                epa: EpaConfig::default().with_max_iterations(128).with_tolerance(0.01),
                ..CollisionConfig::default()
            },
        )
        .expect("spheres overlap");

        // Curved surfaces converge to a faceted approximation
        assert!((contact.depth - 0.5).abs() < 0.1);
        assert!(contact.normal.x < -0.9);
    }

    #[test]
    fn test_box_resting_on_plane() {
        let floor = Collider::at(Shape::plane(crate::math::Vec2::splat(4.0)), Vec3::ZERO);
        let crate_box = cube_at(Vec3::new(0.3, 0.75, -0.2));

        let contact = penetration(&crate_box, &floor).expect("box sinks into the floor");
        assert!((contact.depth - 0.251).abs() < 2e-3);
        assert!((contact.normal - Vec3::Y).length() < 2e-3);
    }

    #[test]
    fn test_correction_separates() {
        let mut a = cube_at(Vec3::new(0.2, 0.1, 0.0));
        let b = Collider::new(
            Shape::cuboid(Vec3::new(1.0, 2.0, 1.0)),
            Transform::new(Vec3::new(1.4, 0.0, 0.3), Quat::IDENTITY),
        );

        let contact = penetration(&a, &b).expect("boxes overlap");
        assert!(contact.depth > 0.0);
        assert!((contact.normal.length() - 1.0).abs() < 1e-4);

        // Push a little past the surface so the pair is clearly apart
        a.translate(contact.normal * (contact.depth + 0.01));
        assert!(gjk(&a, &b).is_none());
    }

    #[test]
    fn test_requires_tetrahedron() {
        let a = cube_at(Vec3::ZERO);
        let b = cube_at(Vec3::new(0.5, 0.0, 0.0));
        let full = gjk(&a, &b).expect("boxes overlap");
        let single = Simplex::from_point(full.as_slice()[0]);
        assert!(epa(&a, &b, &single).is_none());
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let a = Collider::at(Shape::sphere(1.0), Vec3::ZERO);
        let b = Collider::at(Shape::sphere(1.0), Vec3::new(0.5, 0.0, 0.0));
        let simplex = gjk(&a, &b).expect("spheres overlap");

        // A sphere never yields a flat face within one expansion
        let config = EpaConfig::default().with_max_iterations(1);
        assert!(epa_with_config(&a, &b, &simplex, &config).is_none());
    }

    #[test]
    fn test_barycentric_of_vertex() {
        let bary = barycentric_coordinates(Vec3::X, Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((bary - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }
}
