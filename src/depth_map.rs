/// Binary depth map parsing into a flat row-major sample grid.
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Byte length of the `int32 height | int32 width` file header.
const HEADER_LEN: usize = 8;

/// Failures while reading or validating a depth map file.
#[derive(Debug, Error)]
pub enum DepthMapError {
    #[error("failed to read depth map: {0}")]
    Io(#[from] std::io::Error),
    #[error("depth map header truncated: file has {0} bytes, header needs {HEADER_LEN}")]
    TruncatedHeader(usize),
    #[error("depth map declares non-positive dimensions: {height}x{width}")]
    InvalidDimensions { height: i32, width: i32 },
    #[error("depth map payload truncated: need {expected} bytes, file has {actual}")]
    TruncatedPayload { expected: usize, actual: usize },
}

/// Rectangular grid of depth samples from a single sensor frame.
///
/// Each sample is the perpendicular distance from the camera plane to the
/// scene at that pixel, in the sensor's linear unit. Samples live in a flat
/// row-major buffer; dimensions are fixed at load time and always at least
/// 1x1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthGrid {
    rows: usize,
    cols: usize,
    samples: Vec<u16>,
}

impl DepthGrid {
    /// Build a grid from raw samples, mainly for tests and fixtures.
    pub fn from_samples(rows: usize, cols: usize, samples: Vec<u16>) -> Self {
        assert!(rows >= 1 && cols >= 1, "depth grid must be at least 1x1");
        assert_eq!(
            samples.len(),
            rows * cols,
            "sample buffer does not match dimensions"
        );
        Self {
            rows,
            cols,
            samples,
        }
    }

    /// Load a depth map from its binary file format.
    ///
    /// Layout, all little-endian: `int32 height | int32 width |
    /// uint16[height * width]` with samples in row-major order. Trailing
    /// bytes beyond the declared payload are ignored. Either a fully
    /// populated grid is returned or the file is rejected; no partial grids.
    pub fn load(path: &Path) -> Result<Self, DepthMapError> {
        let bytes = fs::read(path)?;
        if bytes.len() < HEADER_LEN {
            return Err(DepthMapError::TruncatedHeader(bytes.len()));
        }

        let height = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let width = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if height <= 0 || width <= 0 {
            return Err(DepthMapError::InvalidDimensions { height, width });
        }

        let rows = height as usize;
        let cols = width as usize;
        let expected = HEADER_LEN + 2 * rows * cols;
        if bytes.len() < expected {
            return Err(DepthMapError::TruncatedPayload {
                expected,
                actual: bytes.len(),
            });
        }

        let samples = bytes[HEADER_LEN..expected]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        debug!(rows, cols, "loaded depth map");
        Ok(Self {
            rows,
            cols,
            samples,
        })
    }

    /// Encode the grid back to the binary file format.
    pub fn write_to(&self, path: &Path) -> Result<(), DepthMapError> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + 2 * self.samples.len());
        bytes.extend_from_slice(&(self.rows as i32).to_le_bytes());
        bytes.extend_from_slice(&(self.cols as i32).to_le_bytes());
        for &sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Number of sample rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sample columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-checked sample access.
    pub fn get(&self, row: usize, col: usize) -> u16 {
        assert!(
            row < self.rows && col < self.cols,
            "sample index ({row}, {col}) out of {}x{} grid",
            self.rows,
            self.cols
        );
        self.samples[row * self.cols + col]
    }
}
