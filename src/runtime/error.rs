use crate::config::ConfigError;
use crate::formats::IoError;
use crate::markers::MarkerError;
use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("image data error: {0}")]
    Core(#[from] CoreError),

    #[error("I/O service error: {0}")]
    Io(#[from] IoError),

    #[error("marker error: {0}")]
    Markers(#[from] MarkerError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("no image loaded")]
    NoImage,
}
