use crate::math::{Point2, Real};

/// Tests if a point lies strictly inside a 2D triangle.
///
/// The barycentric coordinates of `pt` relative to the triangle `(a, b, c)`
/// are obtained by solving the 2×2 system `[a − c, b − c]·(u, v) = pt − c`
/// with Cramer's rule. All comparisons happen against the unnormalized
/// solutions scaled by `|det|`, so no division occurs.
///
/// Points exactly on an edge or vertex are reported as outside (strict
/// inequalities), as are all points when the triangle's projection is
/// degenerate (collinear vertices, `det == 0`). Both exclusions are the
/// documented boundary policy of the ray-parity containment test, not an
/// approximation.
pub fn point_in_triangle2d(
    pt: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
) -> bool {
    let col1 = a - c;
    let col2 = b - c;
    let y = pt - c;

    let det = col1.x * col2.y - col2.x * col1.y;
    if det == 0.0 {
        return false;
    }

    let sign = det.signum();
    let abs_det = det.abs();

    let u = (col2.y * y.x - col2.x * y.y) * sign;
    let v = (-col1.y * y.x + col1.x * y.y) * sign;
    let uv = u + v;

    0.0 < u && u < abs_det && 0.0 < v && v < abs_det && 0.0 < uv && uv < abs_det
}
