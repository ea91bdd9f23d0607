//! A triangle mesh described by flat vertex and index buffers.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Error produced while building or validating a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle mesh must contain at least one triangle.
    #[error("a triangle mesh must contain at least one triangle")]
    Empty,
    /// A triangle references a vertex missing from the vertex buffer.
    #[error("triangle {triangle} references vertex {vertex} but the mesh only has {num_vertices} vertices")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: u32,
        /// The out-of-range vertex index.
        vertex: u32,
        /// The vertex buffer length.
        num_vertices: u32,
    },
    /// A face has more or fewer than three vertices.
    #[error("face {face} has {num_vertices} vertices; only triangulated meshes are supported")]
    NotTriangulated {
        /// The offending face.
        face: u32,
        /// Its vertex count.
        num_vertices: usize,
    },
}

/// A triangle mesh.
///
/// The mesh is immutable after construction except for the whole-mesh
/// translation/scaling used to normalize it into a unit cube. Meshes are
/// assumed closed (watertight) and non-self-intersecting by the containment
/// and voxelization queries; [`TriMesh::is_watertight`] lets callers check
/// the first assumption up front.
#[derive(Clone, Debug)]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Creates a triangle mesh, validating every index against the vertex buffer.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Result<TriMesh, MeshError> {
        if indices.is_empty() {
            return Err(MeshError::Empty);
        }

        let num_vertices = vertices.len() as u32;
        for (tid, idx) in indices.iter().enumerate() {
            for vid in idx {
                if *vid >= num_vertices {
                    return Err(MeshError::IndexOutOfBounds {
                        triangle: tid as u32,
                        vertex: *vid,
                        num_vertices,
                    });
                }
            }
        }

        Ok(TriMesh { vertices, indices })
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles on this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// The `i`-th triangle of this mesh.
    #[inline]
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// The axis-aligned bounding box of this mesh.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// The total surface area of this mesh.
    pub fn surface_area(&self) -> Real {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Checks that every undirected edge of this mesh is shared by exactly
    /// two triangles.
    ///
    /// This is a necessary (not sufficient) condition for the mesh to bound
    /// a solid; containment queries on meshes failing this check may produce
    /// inconsistent crossing parities.
    pub fn is_watertight(&self) -> bool {
        let mut incidences: HashMap<(u32, u32), SmallVec<[u32; 2]>> =
            HashMap::with_capacity(self.indices.len() * 3 / 2);

        for (tid, idx) in self.indices.iter().enumerate() {
            for edge in [(idx[0], idx[1]), (idx[1], idx[2]), (idx[2], idx[0])] {
                let key = if edge.0 <= edge.1 {
                    (edge.0, edge.1)
                } else {
                    (edge.1, edge.0)
                };
                incidences.entry(key).or_default().push(tid as u32);
            }
        }

        incidences.values().all(|tris| tris.len() == 2)
    }

    /// Translates every vertex of this mesh in place.
    pub fn translated(mut self, shift: &Vector<Real>) -> Self {
        for pt in &mut self.vertices {
            *pt += shift;
        }
        self
    }

    /// Uniformly scales every vertex of this mesh in place.
    pub fn scaled(mut self, scale: Real) -> Self {
        for pt in &mut self.vertices {
            pt.coords *= scale;
        }
        self
    }
}

/// An axis-aligned unit cube mesh: 8 vertices, 12 triangles.
///
/// The canonical watertight fixture used across this crate's tests.
#[cfg(test)]
pub(crate) fn unit_cube() -> TriMesh {
    let s = 0.5;
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

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trimesh_rejects_empty_indices() {
        assert_eq!(
            TriMesh::new(vec![Point::origin()], vec![]).unwrap_err(),
            MeshError::Empty
        );
    }

    #[test]
    fn trimesh_rejects_out_of_range_index() {
        let vertices = vec![Point::origin(), Point::new(1.0, 0.0, 0.0)];
        let err = TriMesh::new(vertices, vec![[0, 1, 2]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfBounds {
                triangle: 0,
                vertex: 2,
                num_vertices: 2
            }
        );
    }

    #[test]
    fn cube_is_watertight() {
        assert!(unit_cube().is_watertight());
        assert_relative_eq!(unit_cube().surface_area(), 6.0);
    }

    #[test]
    fn open_mesh_is_not_watertight() {
        // A single triangle has three boundary edges.
        let mesh = TriMesh::new(
            vec![
                Point::origin(),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap();
        assert!(!mesh.is_watertight());
    }

    #[test]
    fn normalization_moves_bounds() {
        let mesh = unit_cube().translated(&Vector::new(1.0, 2.0, 3.0)).scaled(2.0);
        let aabb = mesh.local_aabb();
        assert_relative_eq!(aabb.mins, Point::new(1.0, 3.0, 5.0));
        assert_relative_eq!(aabb.maxs, Point::new(3.0, 5.0, 7.0));
    }
}
