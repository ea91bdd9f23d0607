//! Wavefront OBJ mesh interchange.

use crate::math::{Point, Real};
use crate::shape::{MeshError, TriMesh};
use obj::{Group, IndexTuple, Obj, ObjData, ObjError, Object, SimplePolygon};
use std::io;
use std::path::Path;

/// Error produced while loading or exporting a mesh file.
#[derive(thiserror::Error, Debug)]
pub enum MeshIoError {
    /// The mesh file could not be parsed.
    #[error("obj parsing: {0}")]
    Obj(#[from] ObjError),
    /// The parsed mesh failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// An underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Loads a triangulated mesh from a Wavefront OBJ file.
///
/// Faces with more or fewer than three vertices, and vertex indices past the
/// end of the vertex buffer, are rejected with a descriptive error; no
/// repair is attempted.
pub fn load_obj(path: &Path) -> Result<TriMesh, MeshIoError> {
    let obj = Obj::load(path)?;
    trimesh_from_obj(&obj.data)
}

fn trimesh_from_obj(data: &ObjData) -> Result<TriMesh, MeshIoError> {
    let vertices: Vec<Point<Real>> = data
        .position
        .iter()
        .map(|v| Point::new(v[0] as Real, v[1] as Real, v[2] as Real))
        .collect();

    let mut indices = Vec::new();
    for object in &data.objects {
        for group in &object.groups {
            for poly in &group.polys {
                if poly.0.len() != 3 {
                    return Err(MeshError::NotTriangulated {
                        face: indices.len() as u32,
                        num_vertices: poly.0.len(),
                    }
                    .into());
                }
                indices.push([poly.0[0].0 as u32, poly.0[1].0 as u32, poly.0[2].0 as u32]);
            }
        }
    }

    Ok(TriMesh::new(vertices, indices)?)
}

/// Outputs a mesh as a Wavefront OBJ file at the given path.
///
/// Positions are narrowed to `f32`, the precision of the interchange format.
pub fn write_obj(mesh: &TriMesh, path: &Path) -> Result<(), MeshIoError> {
    let mut file = std::fs::File::create(path)?;

    ObjData {
        position: mesh
            .vertices()
            .iter()
            .map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect(),
        objects: vec![Object {
            groups: vec![Group {
                polys: mesh
                    .indices()
                    .iter()
                    .map(|tri| {
                        SimplePolygon(vec![
                            IndexTuple(tri[0] as usize, None, None),
                            IndexTuple(tri[1] as usize, None, None),
                            IndexTuple(tri[2] as usize, None, None),
                        ])
                    })
                    .collect(),
                name: "".to_string(),
                index: 0,
                material: None,
            }],
            name: "".to_string(),
        }],
        ..Default::default()
    }
    .write_to_buf(&mut file)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shape::unit_cube;
    use std::io::Write;

    #[test]
    fn obj_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.obj");

        let mesh = unit_cube();
        write_obj(&mesh, &path).unwrap();
        let loaded = load_obj(&path).unwrap();

        assert_eq!(loaded.num_triangles(), mesh.num_triangles());
        assert_eq!(loaded.vertices().len(), mesh.vertices().len());
        assert_eq!(loaded.indices(), mesh.indices());
        for (a, b) in loaded.vertices().iter().zip(mesh.vertices()) {
            assert_relative_eq!(*a, *b, epsilon = 1.0e-6);
        }
    }

    #[test]
    fn quad_faces_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4").unwrap();
        drop(file);

        let err = load_obj(&path).unwrap_err();
        assert!(matches!(
            err,
            MeshIoError::Mesh(MeshError::NotTriangulated {
                face: 0,
                num_vertices: 4
            })
        ));
    }
}
