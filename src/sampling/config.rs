use crate::math::Real;
use crate::transformation::voxelization::FillMode;

bitflags::bitflags! {
    /// The outputs the sampler produces for a mesh directory.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SampleOutputs: u8 {
        /// Occupancy-labeled query points (`points.bin`).
        const POINTS = 1;
        /// A surface point cloud (`pointcloud.bin`).
        const POINTCLOUD = 1 << 1;
        /// A filled voxel grid (`model.binvox`).
        const VOXELS = 1 << 2;
    }
}

/// Configuration of the per-mesh dataset sampler.
///
/// Every field has an explicit default; randomized stages derive their
/// generators from `seed`, never from ambient state.
#[derive(Clone, Debug)]
pub struct SampleConfig {
    /// Which outputs to produce.
    pub outputs: SampleOutputs,
    /// Total number of occupancy-labeled query points.
    pub points_size: usize,
    /// Fraction of `points_size` drawn uniformly in the padded unit cube;
    /// the remainder is drawn on the surface and perturbed by Gaussian
    /// noise.
    pub points_uniform_ratio: Real,
    /// Padding of the unit cube the uniform points are drawn in.
    pub points_padding: Real,
    /// Standard deviation of the surface-point perturbation.
    pub points_sigma: Real,
    /// Number of surface point-cloud samples.
    pub pointcloud_size: usize,
    /// Voxel grid resolution (voxels per axis).
    pub voxel_resolution: usize,
    /// Interior-fill strategy of the voxel grid.
    pub fill_mode: FillMode,
    /// Working-cube resolution of the containment query.
    pub hash_resolution: usize,
    /// Recenter the mesh to its bounding-box midpoint and rescale its
    /// longest extent to `1 − bbox_padding` before sampling.
    pub resize: bool,
    /// Padding kept around the normalized mesh.
    pub bbox_padding: Real,
    /// Regenerate outputs whose files already exist.
    pub overwrite: bool,
    /// The overall sample seed all per-stage generators derive from.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            outputs: SampleOutputs::all(),
            points_size: 100_000,
            points_uniform_ratio: 0.9,
            points_padding: 0.1,
            points_sigma: 0.01,
            pointcloud_size: 2048,
            voxel_resolution: 32,
            fill_mode: FillMode::RayParity,
            hash_resolution: 512,
            resize: true,
            bbox_padding: 0.0,
            overwrite: false,
            seed: 1,
        }
    }
}
