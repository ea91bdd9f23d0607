//! Persisted point-sample containers.

use crate::math::Real;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Error produced while persisting or loading a point container.
#[derive(thiserror::Error, Debug)]
pub enum PointsIoError {
    /// An underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A container (de)serialization failure.
    #[error("point container encoding: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Occupancy-labeled query points, with the placement of the normalized mesh
/// they were sampled against.
///
/// Invariant: `points` and `occupancies` have the same length (enforced by
/// [`LabeledPoints::new`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoints {
    /// Sampled positions, one `[x, y, z]` triple per point.
    pub points: Vec<[f32; 3]>,
    /// One inside(1)/outside(0) label per point.
    pub occupancies: Vec<u8>,
    /// The recentering offset that was applied to the source mesh.
    pub loc: [Real; 3],
    /// The uniform scale that was applied to the source mesh.
    pub scale: Real,
}

impl LabeledPoints {
    /// Creates the container, checking the point/label pairing.
    pub fn new(points: Vec<[f32; 3]>, occupancies: Vec<u8>, loc: [Real; 3], scale: Real) -> Self {
        assert_eq!(
            points.len(),
            occupancies.len(),
            "every sampled point needs exactly one occupancy label"
        );
        LabeledPoints {
            points,
            occupancies,
            loc,
            scale,
        }
    }

    /// Persists this container at `path`.
    pub fn write_file(&self, path: &Path) -> Result<(), PointsIoError> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a container from `path`.
    pub fn read_file(path: &Path) -> Result<Self, PointsIoError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}

/// A point cloud sampled on a mesh surface.
///
/// Membership is axiomatic, so the points carry no occupancy labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    /// Sampled surface positions, one `[x, y, z]` triple per point.
    pub points: Vec<[f32; 3]>,
}

impl PointCloud {
    /// Persists this point cloud at `path`.
    pub fn write_file(&self, path: &Path) -> Result<(), PointsIoError> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a point cloud from `path`.
    pub fn read_file(path: &Path) -> Result<Self, PointsIoError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
