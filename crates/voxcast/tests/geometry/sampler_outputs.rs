use super::cube;
use std::fs::File;
use voxcast::io::{read_binvox, write_obj, LabeledPoints, PointCloud};
use voxcast::sampling::{sample_mesh, SampleConfig, SampleOutputs};

fn cube_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_obj(&cube(0.4), &dir.path().join("mesh.obj")).unwrap();
    dir
}

fn small_config() -> SampleConfig {
    SampleConfig {
        points_size: 2000,
        pointcloud_size: 256,
        voxel_resolution: 16,
        seed: 7,
        ..SampleConfig::default()
    }
}

#[test]
fn outputs_are_consistent_with_each_other() {
    let dir = cube_dir();
    sample_mesh(dir.path(), &small_config()).unwrap();

    let labeled = LabeledPoints::read_file(&dir.path().join("points.bin")).unwrap();
    let cloud = PointCloud::read_file(&dir.path().join("pointcloud.bin")).unwrap();
    let grid = read_binvox(File::open(dir.path().join("model.binvox")).unwrap()).unwrap();

    assert_eq!(labeled.points.len(), 2000);
    assert_eq!(labeled.points.len(), labeled.occupancies.len());
    assert!(labeled.occupancies.iter().all(|occ| *occ <= 1));
    // The cube fills (0.8)³ of the padded sample volume, so both label
    // classes must be present.
    assert!(labeled.occupancies.iter().any(|occ| *occ == 1));
    assert!(labeled.occupancies.iter().any(|occ| *occ == 0));

    // The mesh was normalized to a longest extent of 1.
    assert_relative_eq!(labeled.scale, 0.8);
    assert_relative_eq!(labeled.loc[0], 0.0);

    assert_eq!(cloud.points.len(), 256);
    // Every normalized surface point lies on the boundary of [-0.5, 0.5]³.
    for pt in &cloud.points {
        let on_face = pt.iter().any(|c| (c.abs() - 0.5).abs() < 1.0e-5);
        assert!(on_face, "{pt:?} is off-surface");
    }

    assert_eq!(grid.resolution(), 16);
    assert_relative_eq!(grid.scale(), 0.8);
    assert!(grid.num_occupied() > 0);
}

#[test]
fn selecting_a_subset_of_outputs_only_writes_those() {
    let dir = cube_dir();
    let config = SampleConfig {
        outputs: SampleOutputs::VOXELS,
        ..small_config()
    };
    sample_mesh(dir.path(), &config).unwrap();

    assert!(dir.path().join("model.binvox").exists());
    assert!(!dir.path().join("points.bin").exists());
    assert!(!dir.path().join("pointcloud.bin").exists());
}
