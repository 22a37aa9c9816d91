use crate::math::Vec3;

/// A convex shape placed in the world, queried through its support function.
///
/// `support` returns the point of the shape farthest along `direction`, already oriented in
/// world axes but measured relative to [`position`](Self::position). Keeping the translation
/// separate lets a body move without touching its geometry.
///
/// Passing a zero-length `direction` is undefined: shapes that normalize it (spheres) produce NaN.
pub trait ConvexSupport {
    /// Farthest point along `direction`, relative to `position()`
    fn support(&self, direction: Vec3) -> Vec3;

    /// World-space placement of the shape's origin
    fn position(&self) -> Vec3;

    /// Farthest point along `direction` in world space
    #[inline]
    fn world_support(&self, direction: Vec3) -> Vec3 {
        self.support(direction) + self.position()
    }
}

impl<T: ConvexSupport + ?Sized> ConvexSupport for &T {
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        (**self).support(direction)
    }

    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

/// A point of the Minkowski difference `A - B` with the two world points that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupportPoint {
    /// `on_a - on_b`
    pub point: Vec3,
    /// Support point of shape A along the query direction
    pub on_a: Vec3,
    /// Support point of shape B against the query direction
    pub on_b: Vec3,
}

/// Support of the Minkowski difference `A - B` along `direction`.
#[inline]
pub fn minkowski_support<A, B>(a: &A, b: &B, direction: Vec3) -> SupportPoint
where
    A: ConvexSupport + ?Sized,
    B: ConvexSupport + ?Sized,
{
    let on_a = a.world_support(direction);
    let on_b = b.world_support(-direction);
    SupportPoint {
        point: on_a - on_b,
        on_a,
        on_b,
    }
}
