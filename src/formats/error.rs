use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported array layout for this format: {0}")]
    UnsupportedLayout(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF encode failure: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("NIfTI decode failure: {0}")]
    Nifti(#[from] nifti::NiftiError),

    #[error("array shape failure: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("volume failure: {0}")]
    Core(#[from] CoreError),
}
