use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// An axis-aligned affine map `p ↦ scale ⊙ p + translate`.
///
/// Pure value type, immutable once computed from a bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rescale {
    /// The per-axis scale factors.
    pub scale: Vector<Real>,
    /// The translation applied after scaling.
    pub translate: Vector<Real>,
}

impl Rescale {
    /// The transform mapping `aabb` onto the working cube
    /// `[0.5, resolution − 0.5]³`.
    ///
    /// Keeps every transformed coordinate strictly positive and bounded,
    /// which the XY hashing of the containment test requires. Zero-extent
    /// axes are clamped to a tiny positive extent so flat geometry yields a
    /// finite transform instead of an infinite scale.
    pub fn to_working_cube(aabb: &Aabb, resolution: usize) -> Self {
        let span = (resolution - 1) as Real;
        let extents = aabb.extents().map(|e| e.max(1.0e-12));
        let scale = extents.map(|e| span / e);
        let translate = Vector::repeat(0.5) - scale.component_mul(&aabb.mins.coords);
        Rescale { scale, translate }
    }

    /// Applies this transform to a point.
    #[inline]
    pub fn apply(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from(self.scale.component_mul(&pt.coords) + self.translate)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn working_cube_maps_bounds_to_margins() {
        let aabb = Aabb::new(Point::new(-1.0, 0.0, 2.0), Point::new(3.0, 8.0, 2.5));
        let rescale = Rescale::to_working_cube(&aabb, 512);

        assert_relative_eq!(rescale.apply(&aabb.mins), Point::new(0.5, 0.5, 0.5));
        assert_relative_eq!(
            rescale.apply(&aabb.maxs),
            Point::new(511.5, 511.5, 511.5),
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn flat_axis_stays_finite() {
        let aabb = Aabb::new(Point::new(0.0, 0.0, 1.0), Point::new(1.0, 1.0, 1.0));
        let rescale = Rescale::to_working_cube(&aabb, 512);
        assert!(rescale.apply(&Point::new(0.5, 0.5, 1.0)).z.is_finite());
    }
}
