use super::cube;
use voxcast::math::{Point, Point2};
use voxcast::query::point::TriMeshContainment;
use voxcast::query::point_in_triangle2d;
use voxcast::shape::TriMesh;

#[test]
fn cube_containment_at_low_resolution() {
    // The full pipeline at a coarse working resolution.
    let tester = TriMeshContainment::with_resolution(&cube(0.5), 8);

    assert!(tester.contains_point(&Point::new(0.1, 0.03, -0.2)));
    assert!(!tester.contains_point(&Point::new(0.6, 0.0, 0.0)));
    // Strict-edge policy: the face plane itself is not interior.
    assert!(!tester.contains_point(&Point::new(0.5, 0.0, 0.0)));
}

#[test]
fn default_resolution_matches_low_resolution() {
    let coarse = TriMeshContainment::with_resolution(&cube(0.5), 8);
    let fine = TriMeshContainment::new(&cube(0.5));

    let points = [
        Point::new(0.13, -0.25, 0.4),
        Point::new(-0.43, 0.11, 0.02),
        Point::new(0.55, 0.1, 0.1),
        Point::new(-0.7, 0.0, 0.9),
    ];
    assert_eq!(coarse.contains_points(&points), fine.contains_points(&points));
}

#[test]
fn analytic_edge_and_vertex_points_are_excluded() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(4.0, 0.0);
    let c = Point2::new(0.0, 4.0);

    // Midpoints of each edge, and each vertex.
    assert!(!point_in_triangle2d(&Point2::new(2.0, 0.0), &a, &b, &c));
    assert!(!point_in_triangle2d(&Point2::new(0.0, 2.0), &a, &b, &c));
    assert!(!point_in_triangle2d(&Point2::new(2.0, 2.0), &a, &b, &c));
    assert!(!point_in_triangle2d(&a, &a, &b, &c));
    assert!(!point_in_triangle2d(&b, &a, &b, &c));
    assert!(!point_in_triangle2d(&c, &a, &b, &c));
    // An interior point for contrast.
    assert!(point_in_triangle2d(&Point2::new(1.0, 1.0), &a, &b, &c));
}

#[test]
fn thin_slab_interior() {
    // A flat-ish solid exercises the anisotropic working-cube scaling.
    let base = cube(0.5);
    let vertices = base
        .vertices()
        .iter()
        .map(|pt| Point::new(pt.x, pt.y, pt.z * 0.05))
        .collect();
    let mesh = TriMesh::new(vertices, base.indices().to_vec()).unwrap();

    let tester = TriMeshContainment::new(&mesh);
    assert!(tester.contains_point(&Point::new(0.1, 0.07, 0.0)));
    assert!(!tester.contains_point(&Point::new(0.1, 0.07, 0.05)));
}
