use log::trace;

use crate::config::GjkConfig;
use crate::geometry::{minkowski_support, ConvexSupport, SupportPoint};
use crate::math::consts::EPSILON;
use crate::math::Vec3;

/// A simplex used in the GJK algorithm.
///
/// Holds 1 to 4 points of the Minkowski difference, oldest first: the most recently added
/// point is `as_slice().last()`. A simplex returned by [`gjk`] is a tetrahedron enclosing the
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simplex {
    points: [SupportPoint; 4],
    len: usize,
}

impl Simplex {
    pub(crate) fn from_point(point: SupportPoint) -> Self {
        let mut points = [SupportPoint::default(); 4];
        points[0] = point;
        Self { points, len: 1 }
    }

    fn push(&mut self, point: SupportPoint) {
        debug_assert!(self.len < 4);
        self.points[self.len] = point;
        self.len += 1;
    }

    /// Replaces the contents, oldest first
    fn set(&mut self, points: &[SupportPoint]) {
        debug_assert!(!points.is_empty() && points.len() <= 4);
        self.points[..points.len()].copy_from_slice(points);
        self.len = points.len();
    }

    /// Number of points (1-4)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a simplex holds at least one point
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true for a 4-point simplex
    #[inline]
    pub fn is_tetrahedron(&self) -> bool {
        self.len == 4
    }

    /// The points, oldest first
    #[inline]
    pub fn as_slice(&self) -> &[SupportPoint] {
        &self.points[..self.len]
    }

    /// Minkowski-difference positions, oldest first
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.as_slice().iter().map(|p| p.point)
    }
}

/// Tests two convex shapes for intersection with the default configuration.
///
/// Returns the simplex enclosing the origin when they intersect, ready for
/// [`epa`](super::epa), or `None` when they are separated or the test was inconclusive within
/// the iteration cap.
pub fn gjk<A, B>(a: &A, b: &B) -> Option<Simplex>
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    gjk_with_config(a, b, &GjkConfig::default())
}

/// Tests two convex shapes for intersection. See [`gjk`].
pub fn gjk_with_config<A, B>(a: &A, b: &B, config: &GjkConfig) -> Option<Simplex>
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    let mut direction = config.initial_direction;
    let first = minkowski_support(a, b, direction);
    if first.point.dot(direction) < 0.0 {
        trace!("GJK: separated along the initial direction");
        return None;
    }

    let mut simplex = Simplex::from_point(first);
    direction = -first.point;

    for iteration in 1..=config.max_iterations {
        if direction.length_squared() < EPSILON {
            // The origin coincides with the only simplex vertex
            direction = Vec3::X;
        }

        let point = minkowski_support(a, b, direction);
        if point.point.dot(direction) < 0.0 {
            trace!("GJK: separating direction found after {iteration} iterations");
            return None;
        }

        simplex.push(point);

        if do_simplex(&mut simplex, &mut direction) {
            trace!("GJK: origin enclosed after {iteration} iterations");
            return Some(simplex);
        }
    }

    trace!(
        "GJK: no verdict within {} iterations, treating as separated",
        config.max_iterations
    );
    None
}

/// Returns true if the two shapes intersect
pub fn intersects<A, B>(a: &A, b: &B) -> bool
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    gjk(a, b).is_some()
}

/// Updates the simplex and direction, returns true if origin is enclosed
fn do_simplex(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    match simplex.len {
        2 => line_case(simplex, direction),
        3 => triangle_case(simplex, direction),
        4 => tetrahedron_case(simplex, direction),
        _ => false,
    }
}

/// Component of `ao` perpendicular to `edge`, or any perpendicular if the origin is on the line
#[inline]
fn perpendicular_toward_origin(edge: Vec3, ao: Vec3) -> Vec3 {
    let perp = edge.cross(ao).cross(edge);
    if perp.length_squared() < EPSILON {
        edge.any_orthogonal_vector()
    } else {
        perp
    }
}

fn line_case(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let [b, a] = [simplex.points[0], simplex.points[1]];

    let ab = b.point - a.point;
    let ao = -a.point;

    if ab.dot(ao) > 0.0 && ab.length_squared() >= EPSILON {
        // Origin projects inside the segment
        *direction = perpendicular_toward_origin(ab, ao);
    } else {
        simplex.set(&[a]);
        *direction = ao;
    }

    false
}

fn triangle_case(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let [c, b, a] = [simplex.points[0], simplex.points[1], simplex.points[2]];

    let ab = b.point - a.point;
    let ac = c.point - a.point;
    let ao = -a.point;

    let abc = ab.cross(ac);
    if abc.length_squared() < EPSILON {
        // Collinear points: fall back to the newest edge
        simplex.set(&[b, a]);
        return line_case(simplex, direction);
    }

    if abc.cross(ac).dot(ao) > 0.0 {
        if ac.dot(ao) > 0.0 {
            simplex.set(&[c, a]);
            *direction = perpendicular_toward_origin(ac, ao);
            false
        } else {
            simplex.set(&[b, a]);
            line_case(simplex, direction)
        }
    } else if ab.cross(abc).dot(ao) > 0.0 {
        simplex.set(&[b, a]);
        line_case(simplex, direction)
    } else if abc.dot(ao) > 0.0 {
        *direction = abc;
        false
    } else {
        // Origin is below the triangle, flip winding so the normal faces it
        simplex.set(&[b, c, a]);
        *direction = -abc;
        false
    }
}

fn tetrahedron_case(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let [d, c, b, a] = simplex.points;

    let ab = b.point - a.point;
    let ac = c.point - a.point;
    let ad = d.point - a.point;
    let ao = -a.point;

    let abc = ab.cross(ac);
    let acd = ac.cross(ad);
    let adb = ad.cross(ab);

    if abc.dot(ao) > 0.0 {
        simplex.set(&[c, b, a]);
        return triangle_case(simplex, direction);
    }
    if acd.dot(ao) > 0.0 {
        simplex.set(&[d, c, a]);
        return triangle_case(simplex, direction);
    }
    if adb.dot(ao) > 0.0 {
        simplex.set(&[b, d, a]);
        return triangle_case(simplex, direction);
    }

    true
}
