//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// A triangle shape.
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        *Self::from_array(&arr)
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// Creates the reference to a triangle from the reference to an array of three points.
    pub fn from_array(arr: &[Point<Real>; 3]) -> &Triangle {
        unsafe { std::mem::transmute(arr) }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// A vector normal of this triangle, not normalized.
    ///
    /// The normal points such that it is collinear to `AB × AC`. Its norm
    /// equals twice the triangle area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() / 2.0
    }

    /// The axis-aligned bounding box of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        let mut aabb = Aabb::new(self.a, self.a);
        aabb.take_point(self.b);
        aabb.take_point(self.c);
        aabb
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn triangle_area() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(tri.area(), 0.5);
        assert_relative_eq!(tri.scaled_normal(), Vector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn triangle_aabb() {
        let tri = Triangle::new(
            Point::new(1.0, -1.0, 0.5),
            Point::new(-2.0, 0.0, 0.0),
            Point::new(0.0, 3.0, -0.5),
        );
        let aabb = tri.local_aabb();
        assert_eq!(aabb.mins, Point::new(-2.0, -1.0, -0.5));
        assert_eq!(aabb.maxs, Point::new(1.0, 3.0, 0.5));
    }
}
