//! The binvox run-length voxel file codec.
//!
//! Layout of a version-1 stream:
//!
//! ```text
//! #binvox 1\n
//! dim <d0> <d1> <d2>\n
//! translate <tx> <ty> <tz>\n
//! scale <s>\n
//! data\n
//! <run-length-encoded bytes: (value: 1 byte, count: 1 byte)*>
//! ```
//!
//! Values are 0/1, counts are 1–255, and the payload iterates the grid in
//! `xzy` axis order (`x` slowest, `y` fastest). Runs longer than 255 are
//! split into multiple pairs and a trailing partial run is always flushed.

use crate::transformation::voxelization::VoxelGrid;
use std::io::{self, BufRead, BufReader, Read, Write};

/// Error produced by the binvox codec.
#[derive(thiserror::Error, Debug)]
pub enum BinvoxError {
    /// The stream does not start with the binvox magic line.
    #[error("not a binvox version-1 stream (first line {0:?})")]
    BadMagic(String),
    /// A malformed or unrecognized header line.
    #[error("malformed binvox header line {0:?}")]
    BadHeader(String),
    /// The header ended without a `data` marker.
    #[error("binvox header ended before the data marker")]
    MissingData,
    /// Only cubic grids are supported.
    #[error("unsupported non-cubic binvox dimensions {0}x{1}x{2}")]
    NonCubicDims(usize, usize, usize),
    /// A run value other than 0 or 1.
    #[error("invalid binvox run value {0} (expected 0 or 1)")]
    BadRunValue(u8),
    /// The run-length payload disagrees with the declared dimensions.
    #[error("binvox payload holds {got} voxels but the dimensions require {expected}")]
    PayloadMismatch {
        /// Voxels decoded from the payload.
        got: usize,
        /// Voxels required by the `dim` header.
        expected: usize,
    },
    /// An underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes `grid` as a binvox version-1 stream.
///
/// The stream is flushed before returning so scoped writers observe a
/// complete file on every exit path.
pub fn write_binvox<W: Write>(grid: &VoxelGrid, writer: &mut W) -> Result<(), BinvoxError> {
    let dim = grid.resolution();
    let translate = grid.translate();

    writer.write_all(b"#binvox 1\n")?;
    writeln!(writer, "dim {dim} {dim} {dim}")?;
    writeln!(
        writer,
        "translate {} {} {}",
        translate[0], translate[1], translate[2]
    )?;
    writeln!(writer, "scale {}", grid.scale())?;
    writer.write_all(b"data\n")?;

    let mut run_value = None;
    let mut run_length = 0u16;
    for value in grid.flatten_xzy() {
        let value = value as u8;
        if run_value == Some(value) && run_length < 255 {
            run_length += 1;
        } else {
            if let Some(previous) = run_value {
                writer.write_all(&[previous, run_length as u8])?;
            }
            run_value = Some(value);
            run_length = 1;
        }
    }
    if let Some(previous) = run_value {
        writer.write_all(&[previous, run_length as u8])?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a binvox version-1 stream back into a [`VoxelGrid`].
///
/// The returned grid is `Xyz`-ordered regardless of how the writer's grid
/// was stored; dimensions, translation and scale are restored bit-for-bit.
pub fn read_binvox<R: Read>(reader: R) -> Result<VoxelGrid, BinvoxError> {
    let mut reader = BufReader::new(reader);

    let magic = read_line(&mut reader)?;
    if magic.trim_end() != "#binvox 1" {
        return Err(BinvoxError::BadMagic(magic));
    }

    let mut dims = None;
    let mut translate = [0.0; 3];
    let mut scale = 1.0;

    loop {
        let line = read_line(&mut reader)?;
        let trimmed = line.trim_end();
        if trimmed == "data" {
            break;
        }
        if trimmed.is_empty() {
            return Err(BinvoxError::MissingData);
        }

        let mut words = trimmed.split_whitespace();
        match words.next() {
            Some("dim") => {
                let mut parse =
                    || -> Option<usize> { words.next().and_then(|w| w.parse().ok()) };
                let (d0, d1, d2) = match (parse(), parse(), parse()) {
                    (Some(d0), Some(d1), Some(d2)) => (d0, d1, d2),
                    _ => return Err(BinvoxError::BadHeader(line)),
                };
                if d0 != d1 || d1 != d2 {
                    return Err(BinvoxError::NonCubicDims(d0, d1, d2));
                }
                dims = Some(d0);
            }
            Some("translate") => {
                for slot in &mut translate {
                    *slot = match words.next().and_then(|w| w.parse().ok()) {
                        Some(value) => value,
                        None => return Err(BinvoxError::BadHeader(line.clone())),
                    };
                }
            }
            Some("scale") => {
                scale = match words.next().and_then(|w| w.parse().ok()) {
                    Some(value) => value,
                    None => return Err(BinvoxError::BadHeader(line)),
                };
            }
            // Unknown header lines are skipped, matching the reference
            // readers of the format.
            Some(_) => {}
            None => return Err(BinvoxError::BadHeader(line)),
        }
    }

    let resolution = dims.ok_or(BinvoxError::MissingData)?;
    let expected = resolution * resolution * resolution;

    let mut payload = Vec::new();
    let _ = reader.read_to_end(&mut payload)?;

    let mut flat = Vec::with_capacity(expected);
    for pair in payload.chunks(2) {
        let (value, count) = match pair {
            [value, count] => (*value, *count as usize),
            // A dangling value byte with no count.
            _ => {
                return Err(BinvoxError::PayloadMismatch {
                    got: flat.len(),
                    expected,
                })
            }
        };
        if value > 1 {
            return Err(BinvoxError::BadRunValue(value));
        }
        flat.extend(std::iter::repeat(value == 1).take(count));
    }

    if flat.len() != expected {
        return Err(BinvoxError::PayloadMismatch {
            got: flat.len(),
            expected,
        });
    }

    let mut grid = VoxelGrid::from_flat_xzy(resolution, &flat);
    grid.set_placement(translate, scale);
    Ok(grid)
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String, BinvoxError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(BinvoxError::MissingData);
    }
    Ok(line)
}
