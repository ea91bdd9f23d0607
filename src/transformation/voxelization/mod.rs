//! Conservative mesh voxelization.

pub use self::voxel_grid::{AxisOrder, VoxelGrid};
pub use self::voxelized_volume::{FillMode, VoxelizationError, VoxelizedVolume};

mod voxel_grid;
mod voxelized_volume;
