mod cube_containment;
mod cube_voxelization;
mod sampler_outputs;
mod voxel_codec;

use voxcast::math::{Point, Real};
use voxcast::shape::TriMesh;

/// An axis-aligned cube mesh with half extent `s`: 8 vertices, 12 triangles.
pub fn cube(s: Real) -> TriMesh {
    let vertices = vec![
        Point::new(-s, -s, -s),
        Point::new(s, -s, -s),
        Point::new(s, s, -s),
        Point::new(-s, s, -s),
        Point::new(-s, -s, s),
        Point::new(s, -s, s),
        Point::new(s, s, s),
        Point::new(-s, s, s),
    ];
    let indices = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [1, 2, 6],
        [1, 6, 5],
        [0, 7, 3],
        [0, 4, 7],
    ];
    TriMesh::new(vertices, indices).unwrap()
}
