//! Transformations deriving volumetric representations from a mesh.

pub use self::voxelization::{AxisOrder, FillMode, VoxelGrid, VoxelizationError, VoxelizedVolume};

pub mod voxelization;
