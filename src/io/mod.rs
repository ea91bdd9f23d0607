//! Boundary I/O: mesh interchange, persisted sample containers, voxel codec.

pub use self::binvox::{read_binvox, write_binvox, BinvoxError};
pub use self::points::{LabeledPoints, PointCloud, PointsIoError};
pub use self::wavefront::{load_obj, write_obj, MeshIoError};

pub mod binvox;
pub mod points;
pub mod wavefront;
