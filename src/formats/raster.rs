use std::path::Path;

use image::{ImageBuffer, Luma};
use ndarray::{Array2, Axis};

use super::util::to_u8_samples;
use super::{IoError, Result};

/// Renders a slice as an 8-bit grayscale image with its first row at the
/// bottom, the way the plot widget shows it.
pub(crate) fn write_slice_raster(path: &Path, slice: &Array2<f32>) -> Result<()> {
    let (height, width) = slice.dim();
    let values = slice
        .axis_iter(Axis(0))
        .rev()
        .flat_map(|row| row.to_vec())
        .collect::<Vec<_>>();
    let bytes = to_u8_samples(&values);
    let image = ImageBuffer::<Luma<u8>, _>::from_vec(width as u32, height as u32, bytes)
        .ok_or_else(|| IoError::UnsupportedLayout("failed to construct gray image".into()))?;
    image.save(path)?;
    Ok(())
}
