//! Spatial partitioning structures.

pub use self::triangle_hash_grid::TriangleHashGrid;

mod triangle_hash_grid;
