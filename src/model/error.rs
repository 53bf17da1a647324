use thiserror::Error;

use super::LogicalAxis;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrientationError {
    #[error("orientation needs exactly 3 codes, found {found}")]
    WrongLength { found: usize },

    #[error("no orientation code for the {axis} axis")]
    MissingAxis { axis: LogicalAxis },

    #[error("unknown orientation code: {0}")]
    UnknownCode(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("volume must have 3 or 4 dimensions, found {ndim}")]
    UnsupportedDimensionality { ndim: usize },

    #[error("invalid dimension size 0 at axis {axis}")]
    ZeroSizedDimension { axis: usize },

    #[error("invalid orientation: {0}")]
    Orientation(#[from] OrientationError),

    #[error("slice index {index} out of range for {plane} plane (max {max})")]
    SliceOutOfRange {
        plane: &'static str,
        index: usize,
        max: usize,
    },

    #[error("time index {index} out of range ({frames} frames)")]
    TimeOutOfRange { index: usize, frames: usize },

    #[error("array shape failure: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("invalid volume metadata: {0}")]
    InvalidMetadata(String),
}
