mod error;
mod orientation;
mod slice;
mod volume;

#[cfg(test)]
mod tests;

pub use error::{CoreError, OrientationError, Result};
pub use orientation::{
    AxisMapping, LogicalAxis, OrientationCode, orientation_from_affine, resolve_axes,
};
pub use slice::{ImageData, SlicePlane};
pub use volume::{IDENTITY, Matrix4, Volume};
