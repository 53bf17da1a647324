use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use tiff::encoder::{TiffEncoder, colortype};

use super::Result;

/// Stores the raw samples as one 32-bit float page, rows in array order.
pub(crate) fn write_slice_tiff(path: &Path, slice: &Array2<f32>) -> Result<()> {
    let (height, width) = slice.dim();
    let page = slice.iter().copied().collect::<Vec<_>>();
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(file)?;
    let image = encoder.new_image::<colortype::Gray32Float>(width as u32, height as u32)?;
    image.write_data(&page)?;
    Ok(())
}
