use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector, DIM};
use crate::shape::Triangle;

/// Tests if a triangle intersects an AABB.
///
/// Separating-axis test over the box's three face normals, the triangle's
/// plane normal, and the nine edge cross-product axes. Touching boundaries
/// count as intersecting, so the test is conservative: a cell is never
/// reported as missed when any part of the triangle reaches it.
pub fn intersection_test_aabb_triangle(aabb: &Aabb, triangle: &Triangle) -> bool {
    let half_extents = aabb.half_extents();
    let center = aabb.center();

    // Work with the triangle expressed relative to the box center.
    let v0 = triangle.a - center;
    let v1 = triangle.b - center;
    let v2 = triangle.c - center;

    // Box face normals.
    for i in 0..DIM {
        let min = v0[i].min(v1[i]).min(v2[i]);
        let max = v0[i].max(v1[i]).max(v2[i]);
        if min > half_extents[i] || max < -half_extents[i] {
            return false;
        }
    }

    let separated_by = |axis: Vector<Real>| {
        let p0 = axis.dot(&v0);
        let p1 = axis.dot(&v1);
        let p2 = axis.dot(&v2);
        let radius = half_extents.x * axis.x.abs()
            + half_extents.y * axis.y.abs()
            + half_extents.z * axis.z.abs();
        p0.min(p1).min(p2) > radius || p0.max(p1).max(p2) < -radius
    };

    // Triangle plane normal.
    let edges = [v1 - v0, v2 - v1, v0 - v2];
    if separated_by(edges[0].cross(&edges[1])) {
        return false;
    }

    // The nine cross products between box axes and triangle edges. A
    // degenerate (zero) axis separates nothing and is harmless here.
    for edge in &edges {
        if separated_by(Vector::new(0.0, -edge.z, edge.y))
            || separated_by(Vector::new(edge.z, 0.0, -edge.x))
            || separated_by(Vector::new(-edge.y, edge.x, 0.0))
        {
            return false;
        }
    }

    true
}
