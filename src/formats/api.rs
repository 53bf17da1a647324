use std::path::Path;

use ndarray::Array2;

use crate::model::Volume;

use super::nii::read_nifti;
use super::raster::write_slice_raster;
use super::tiff::write_slice_tiff;
use super::util::extension;
use super::{IoError, Result};

pub fn read_volume(path: impl AsRef<Path>) -> Result<Volume> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "nii" | "nii.gz" => read_nifti(path),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

pub fn write_slice(path: impl AsRef<Path>, slice: &Array2<f32>) -> Result<()> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => write_slice_raster(path, slice),
        "tif" | "tiff" => write_slice_tiff(path, slice),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

pub fn supported_volume_formats() -> &'static [&'static str] {
    &["nii", "nii.gz"]
}

pub fn supported_slice_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "tif", "tiff"]
}
