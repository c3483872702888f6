use thiserror::Error;

use crate::coord::Coordinate;

/// Errors reported by grid construction and cell access.
///
/// Every fallible operation checks its input before touching any cell, so a
/// returned error always means the grid is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {rows}x{cols}, both must be at least 1")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("coordinate {coordinate} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },

    #[error("fill probability {0} is not within 0..=1")]
    InvalidFillProbability(f64),
}
