//! Point inclusion queries.

pub use self::point_in_triangle2d::point_in_triangle2d;
pub use self::point_trimesh::{PointClassification, TriMeshContainment};

mod point_in_triangle2d;
mod point_trimesh;
