use super::cube;
use rand::rngs::StdRng;
use rand::SeedableRng;
use voxcast::transformation::voxelization::{FillMode, VoxelizationError, VoxelizedVolume};

#[test]
fn surface_shell_is_exactly_the_boundary_cells() {
    let mut rng = StdRng::seed_from_u64(0);
    let grid = VoxelizedVolume::voxelize(&cube(0.5), 8, FillMode::SurfaceOnly, &mut rng).unwrap();

    for i in 0..8 {
        for j in 0..8 {
            for k in 0..8 {
                let on_shell = [i, j, k].iter().any(|c| *c == 0 || *c == 7);
                assert_eq!(grid.get(i, j, k), on_shell, "voxel ({i}, {j}, {k})");
            }
        }
    }
}

#[test]
fn filled_grid_is_a_superset_of_the_shell() {
    let mesh = cube(0.5);
    let mut rng = StdRng::seed_from_u64(9);
    let shell = VoxelizedVolume::voxelize(&mesh, 32, FillMode::SurfaceOnly, &mut rng).unwrap();
    let filled = VoxelizedVolume::voxelize(&mesh, 32, FillMode::RayParity, &mut rng).unwrap();

    assert!(filled.is_superset_of(&shell));
    assert!(filled.num_occupied() > shell.num_occupied());
}

#[test]
fn flood_fill_and_parity_fill_agree_on_a_strictly_bounded_cube() {
    let mesh = cube(0.3);
    let mut rng = StdRng::seed_from_u64(4);
    let parity = VoxelizedVolume::voxelize(&mesh, 16, FillMode::RayParity, &mut rng).unwrap();
    let flooded = VoxelizedVolume::voxelize(&mesh, 16, FillMode::FloodFill, &mut rng).unwrap();

    assert_eq!(parity, flooded);
}

#[test]
fn flood_fill_requires_the_unit_cube_bound() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = VoxelizedVolume::voxelize(&cube(0.6), 16, FillMode::FloodFill, &mut rng).unwrap_err();
    assert!(matches!(err, VoxelizationError::MeshOutsideUnitCube(_)));
}
