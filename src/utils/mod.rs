//! Various unsorted geometrical and logical helpers.

pub use self::rescale::Rescale;
pub use self::seed::derive_rng;

mod rescale;
mod seed;
