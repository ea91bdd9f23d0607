//! Per-mesh dataset sampling.

pub use self::config::{SampleConfig, SampleOutputs};
pub use self::sampler::{sample_batch, sample_mesh, sample_surface, SampleError};

mod config;
mod sampler;
