//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corners. Invariant:
/// `mins[i] <= maxs[i]` on every axis (except for [`Aabb::new_invalid`],
/// which is the identity element of [`Aabb::take_point`]).
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The corner with the smallest coordinates.
    pub mins: Point<Real>,
    /// The corner with the largest coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must be componentwise smaller than `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `+∞` and `maxs`
    /// components set to `-∞`.
    ///
    /// Useful as the initial accumulator of [`Aabb::take_point`].
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Point::from(Vector::repeat(Real::MAX)),
            Point::from(Vector::repeat(-Real::MAX)),
        )
    }

    /// Creates a new AABB from its center and its half extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the AABB of a set of points.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(*pt);
        }

        result
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) / 2.0
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also covers the given point.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Does this AABB contain the given point?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Enlarges this AABB by the given margin on every side.
    #[inline]
    pub fn loosened(mut self, amount: Real) -> Self {
        self.mins += Vector::repeat(-amount);
        self.maxs += Vector::repeat(amount);
        self
    }
}
