/*!
voxcast
========

**voxcast** turns watertight triangle meshes into occupancy data: it answers
point-in-solid queries through a spatially-hashed ray-parity test, rasterizes
surfaces into conservative voxel shells, fills interiors, and persists the
results (labeled point sets, surface point clouds, binvox voxel grids) for
dataset generation.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::manual_range_contains)]

#[cfg_attr(test, macro_use)]
extern crate approx;
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod io;
pub mod partitioning;
pub mod query;
pub mod sampling;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector2, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
