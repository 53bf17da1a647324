use std::path::PathBuf;

use ndarray::{ArrayD, ArrayView3, Axis, Ix3};

use super::{AxisMapping, CoreError, OrientationCode, Result, resolve_axes};

/// Row-major 4x4 matrix mapping voxel indices to scanner coordinates.
pub type Matrix4 = [[f64; 4]; 4];

pub const IDENTITY: Matrix4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A volumetric array in `t × z × y × x` storage order (time optional) with
/// the header information the viewer needs.
#[derive(Debug, Clone)]
pub struct Volume {
    pub data: ArrayD<f32>,
    /// One code per spatial axis, in header (`x`, `y`, `z` voxel) order.
    pub orientation: Vec<OrientationCode>,
    pub affine: Option<Matrix4>,
    /// Voxel spacings in header order.
    pub spacings: [f64; 3],
    pub source: Option<PathBuf>,
}

impl Volume {
    pub fn new(data: ArrayD<f32>, orientation: Vec<OrientationCode>) -> Result<Self> {
        let volume = Self {
            data,
            orientation,
            affine: None,
            spacings: [1.0; 3],
            source: None,
        };
        volume.validate()?;
        Ok(volume)
    }

    pub fn with_affine(mut self, affine: Matrix4) -> Self {
        self.affine = Some(affine);
        self
    }

    pub fn with_spacings(mut self, spacings: [f64; 3]) -> Self {
        self.spacings = spacings;
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn frames(&self) -> usize {
        if self.ndim() == 4 { self.shape()[0] } else { 1 }
    }

    /// Extents of the three spatial storage axes.
    pub fn spatial_shape(&self) -> [usize; 3] {
        let shape = self.shape();
        let offset = shape.len() - 3;
        [shape[offset], shape[offset + 1], shape[offset + 2]]
    }

    pub fn axis_mapping(&self) -> Result<AxisMapping> {
        Ok(resolve_axes(&self.orientation)?)
    }

    /// The 3-D view at time point `time`; 3-D volumes only have frame 0.
    pub fn frame(&self, time: usize) -> Result<ArrayView3<'_, f32>> {
        let frames = self.frames();
        if time >= frames {
            return Err(CoreError::TimeOutOfRange {
                index: time,
                frames,
            });
        }
        let view = if self.ndim() == 4 {
            self.data.index_axis(Axis(0), time)
        } else {
            self.data.view()
        };
        Ok(view.into_dimensionality::<Ix3>()?)
    }

    pub fn validate(&self) -> Result<()> {
        let ndim = self.ndim();
        if ndim != 3 && ndim != 4 {
            return Err(CoreError::UnsupportedDimensionality { ndim });
        }
        if let Some(axis) = self.shape().iter().position(|size| *size == 0) {
            return Err(CoreError::ZeroSizedDimension { axis });
        }
        if self.spacings.iter().any(|value| !value.is_finite() || *value <= 0.0) {
            return Err(CoreError::InvalidMetadata(format!(
                "voxel spacings must be positive, found {:?}",
                self.spacings
            )));
        }
        resolve_axes(&self.orientation)?;
        Ok(())
    }

    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for value in iter {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
        }
        Some((min, max))
    }
}
