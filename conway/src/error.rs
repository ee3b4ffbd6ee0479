// error.rs - Errors returned by grid construction and simulation commands

use thiserror::Error;

/// Rejected operations. None of these are fatal and none leave state changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },

    #[error("alive probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("interval must be at least one millisecond")]
    InvalidInterval,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
