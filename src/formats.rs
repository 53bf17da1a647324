mod api;
mod error;
mod nii;
mod raster;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{read_volume, supported_slice_formats, supported_volume_formats, write_slice};
pub use error::{IoError, Result};
pub use nii::{header_affine, header_spacings, volume_from_header};
