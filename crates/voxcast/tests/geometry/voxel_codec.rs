use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use voxcast::io::{read_binvox, write_binvox};
use voxcast::transformation::voxelization::{AxisOrder, VoxelGrid};

#[test]
fn all_zero_grid_uses_split_runs() {
    // 8³ = 512 zeros: a full (0, 255) run twice, then the (0, 2) remainder.
    let grid = VoxelGrid::new(8, AxisOrder::Xyz);
    let mut buffer = Vec::new();
    write_binvox(&grid, &mut buffer).unwrap();

    let payload_start = buffer.windows(5).position(|w| w == b"data\n").unwrap() + 5;
    assert_eq!(&buffer[payload_start..], &[0u8, 255, 0, 255, 0, 2]);
}

#[test]
fn header_carries_dims_translate_and_scale() {
    let mut grid = VoxelGrid::new(8, AxisOrder::Xyz);
    grid.set_placement([0.25, -1.5, 3.0], 2.5);

    let mut buffer = Vec::new();
    write_binvox(&grid, &mut buffer).unwrap();
    let text = String::from_utf8_lossy(&buffer);

    assert!(text.starts_with("#binvox 1\n"));
    assert!(text.contains("dim 8 8 8\n"));
    assert!(text.contains("translate 0.25 -1.5 3\n"));
    assert!(text.contains("scale 2.5\n"));
}

#[test]
fn random_grid_round_trips_bit_for_bit() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut grid = VoxelGrid::new(32, AxisOrder::Xyz);
    for i in 0..32 {
        for j in 0..32 {
            for k in 0..32 {
                grid.set(i, j, k, rng.gen_bool(0.45));
            }
        }
    }
    grid.set_placement([-0.4987, 0.00314, 7.5], 1.0625);

    let mut buffer = Vec::new();
    write_binvox(&grid, &mut buffer).unwrap();
    let decoded = read_binvox(Cursor::new(buffer)).unwrap();

    assert_eq!(decoded, grid);
    assert_relative_eq!(decoded.scale(), 1.0625);
}

#[test]
fn xzy_grids_serialize_without_transposition() {
    // The same occupancy pattern stored under both axis orders must
    // produce the same payload when the indices are matched up.
    let mut xyz = VoxelGrid::new(4, AxisOrder::Xyz);
    let mut xzy = VoxelGrid::new(4, AxisOrder::Xzy);
    // Voxel x = 1, y = 2, z = 3.
    xyz.set(1, 2, 3, true);
    xzy.set(1, 3, 2, true);

    let mut buffer_a = Vec::new();
    let mut buffer_b = Vec::new();
    write_binvox(&xyz, &mut buffer_a).unwrap();
    write_binvox(&xzy, &mut buffer_b).unwrap();

    assert_eq!(buffer_a, buffer_b);
}
