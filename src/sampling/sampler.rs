//! The per-mesh sampler and the skip-and-continue batch driver.

use crate::io::{
    load_obj, write_binvox, write_obj, BinvoxError, LabeledPoints, MeshIoError, PointCloud,
    PointsIoError,
};
use crate::math::{Point, Real, Vector};
use crate::query::point::TriMeshContainment;
use crate::sampling::{SampleConfig, SampleOutputs};
use crate::shape::TriMesh;
use crate::transformation::voxelization::{VoxelizationError, VoxelizedVolume};
use crate::utils::derive_rng;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// The mesh file the sampler reads from each directory.
pub const MESH_FILE: &str = "mesh.obj";
/// The labeled-points output file.
pub const POINTS_FILE: &str = "points.bin";
/// The point-cloud output file.
pub const POINTCLOUD_FILE: &str = "pointcloud.bin";
/// The voxel-grid output file.
pub const VOXELS_FILE: &str = "model.binvox";
/// The exported normalized mesh.
pub const NORMALIZED_MESH_FILE: &str = "normalised_mesh.obj";

// Stage tags feeding [`derive_rng`] so the sampling stages stay
// decorrelated under one sample seed.
const STREAM_POINTS: u64 = 0;
const STREAM_POINTCLOUD: u64 = 1;
const STREAM_VOXELS: u64 = 2;

/// Error produced while sampling one mesh directory.
#[derive(thiserror::Error, Debug)]
pub enum SampleError {
    /// Loading or exporting a mesh failed.
    #[error(transparent)]
    MeshIo(#[from] MeshIoError),
    /// Voxelizing the mesh failed.
    #[error(transparent)]
    Voxelization(#[from] VoxelizationError),
    /// Writing the voxel grid failed.
    #[error(transparent)]
    Binvox(#[from] BinvoxError),
    /// Writing a point container failed.
    #[error(transparent)]
    Points(#[from] PointsIoError),
    /// An underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Samples every requested output for the mesh stored in `dir`.
///
/// Reads `dir/mesh.obj` and produces the outputs selected by
/// `config.outputs`, skipping any whose file already exists unless
/// `config.overwrite` is set, so re-runs are idempotent. All randomness
/// derives from `config.seed`, so re-running with the same seed reproduces
/// identical outputs bit-for-bit.
pub fn sample_mesh(dir: &Path, config: &SampleConfig) -> Result<(), SampleError> {
    let mut outputs = config.outputs;
    if !config.overwrite {
        for (flag, file) in [
            (SampleOutputs::POINTS, POINTS_FILE),
            (SampleOutputs::POINTCLOUD, POINTCLOUD_FILE),
            (SampleOutputs::VOXELS, VOXELS_FILE),
        ] {
            if dir.join(file).exists() {
                outputs.remove(flag);
            }
        }
    }
    if outputs.is_empty() {
        return Ok(());
    }

    let mesh = load_obj(&dir.join(MESH_FILE))?;
    if !mesh.is_watertight() {
        log::warn!(
            "mesh {} is not watertight; occupancy labels may be inconsistent",
            dir.display()
        );
    }

    // Recenter to the bounding-box midpoint and rescale the longest extent
    // to 1 − padding, remembering the placement for the output metadata.
    let (mesh, loc, scale) = if config.resize {
        let aabb = mesh.local_aabb();
        let loc = aabb.center();
        let scale = aabb.extents().max() / (1.0 - config.bbox_padding);
        let mesh = mesh.translated(&-loc.coords).scaled(1.0 / scale);
        (mesh, [loc.x, loc.y, loc.z], scale)
    } else {
        (mesh, [0.0; 3], 1.0)
    };

    if outputs.contains(SampleOutputs::VOXELS) {
        let mut rng = derive_rng(config.seed, STREAM_VOXELS);
        let mut grid =
            VoxelizedVolume::voxelize(&mesh, config.voxel_resolution, config.fill_mode, &mut rng)?;
        grid.set_placement(loc, scale);

        let mut writer = BufWriter::new(File::create(dir.join(VOXELS_FILE))?);
        write_binvox(&grid, &mut writer)?;
    }

    if outputs.contains(SampleOutputs::POINTS) {
        let mut rng = derive_rng(config.seed, STREAM_POINTS);
        let (points, occupancies) = sample_labeled_points(&mesh, config, &mut rng);
        LabeledPoints::new(points, occupancies, loc, scale).write_file(&dir.join(POINTS_FILE))?;
    }

    if outputs.contains(SampleOutputs::POINTCLOUD) {
        let mut rng = derive_rng(config.seed, STREAM_POINTCLOUD);
        let points = sample_surface(&mesh, config.pointcloud_size, &mut rng)
            .into_iter()
            .map(|pt| [pt.x as f32, pt.y as f32, pt.z as f32])
            .collect();
        PointCloud { points }.write_file(&dir.join(POINTCLOUD_FILE))?;
    }

    if config.resize {
        write_obj(&mesh, &dir.join(NORMALIZED_MESH_FILE))?;
    }

    Ok(())
}

/// Samples every directory in `dirs`, skipping (and logging) failures.
///
/// A corrupt mesh or geometry failure aborts only its own directory; the
/// batch always runs to completion. Returns the number of directories that
/// sampled successfully.
pub fn sample_batch<'a, I>(dirs: I, config: &SampleConfig) -> usize
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut num_ok = 0;
    for dir in dirs {
        match sample_mesh(dir, config) {
            Ok(()) => num_ok += 1,
            Err(err) => log::error!("skipping {}: {err}", dir.display()),
        }
    }
    num_ok
}

/// Draws the occupancy-labeled point set: uniform points in the padded unit
/// cube plus Gaussian-perturbed surface points, classified in one batch.
fn sample_labeled_points(
    mesh: &TriMesh,
    config: &SampleConfig,
    rng: &mut impl Rng,
) -> (Vec<[f32; 3]>, Vec<u8>) {
    let num_uniform = (config.points_size as Real * config.points_uniform_ratio) as usize;
    let num_surface = config.points_size - num_uniform;
    let boxsize = 1.0 + config.points_padding;

    let mut points = Vec::with_capacity(config.points_size);
    for _ in 0..num_uniform {
        points.push(Point::new(
            boxsize * (rng.gen::<Real>() - 0.5),
            boxsize * (rng.gen::<Real>() - 0.5),
            boxsize * (rng.gen::<Real>() - 0.5),
        ));
    }

    let sigma = config.points_sigma;
    for pt in sample_surface(mesh, num_surface, rng) {
        let noise = Vector::new(
            sigma * Distribution::<Real>::sample(&StandardNormal, rng),
            sigma * Distribution::<Real>::sample(&StandardNormal, rng),
            sigma * Distribution::<Real>::sample(&StandardNormal, rng),
        );
        points.push(pt + noise);
    }

    let tester = TriMeshContainment::with_resolution(mesh, config.hash_resolution);
    let occupancies = tester
        .contains_points(&points)
        .into_iter()
        .map(u8::from)
        .collect();

    let points = points
        .into_iter()
        .map(|pt| [pt.x as f32, pt.y as f32, pt.z as f32])
        .collect();

    (points, occupancies)
}

/// Draws `count` points uniformly from the mesh's surface area distribution.
///
/// A triangle is chosen by binary search in the cumulative-area table, then
/// a point is placed on it through the square-root barycentric mapping,
/// which is uniform over the triangle.
pub fn sample_surface(mesh: &TriMesh, count: usize, rng: &mut impl Rng) -> Vec<Point<Real>> {
    let mut cumulative_areas = Vec::with_capacity(mesh.num_triangles());
    let mut total = 0.0;
    for tri in mesh.triangles() {
        total += tri.area();
        cumulative_areas.push(total);
    }

    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let target = rng.gen::<Real>() * total;
        let tid = cumulative_areas.partition_point(|area| *area < target);
        let tri = mesh.triangle(tid.min(mesh.num_triangles() - 1) as u32);

        let r1 = rng.gen::<Real>().sqrt();
        let r2 = rng.gen::<Real>();
        let edge_point = tri.b + (tri.c - tri.b) * r2;
        points.push(tri.a + (edge_point - tri.a) * r1);
    }

    points
}
