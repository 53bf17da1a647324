use std::path::Path;

use log::debug;
use ndarray::ArrayD;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};

use crate::model::{CoreError, IDENTITY, Matrix4, Volume, orientation_from_affine};

use super::Result;

pub(crate) fn read_nifti(path: &Path) -> Result<Volume> {
    let object = ReaderOptions::new().read_file(path)?;
    let header = object.header().clone();
    let data = object.into_volume().into_ndarray::<f32>()?;
    let volume = volume_from_header(&header, data)?.with_source(path);
    debug!(
        "event=volume_read module=formats path={} shape={:?} orientation={:?}",
        path.display(),
        volume.shape(),
        volume.orientation
    );
    Ok(volume)
}

/// Builds a volume from NIfTI data in header order (`x, y, z[, t]`). The array
/// is stored with its axes reversed, which gives the `t × z × y × x` layout the
/// slice selector expects.
pub fn volume_from_header(header: &NiftiHeader, data: ArrayD<f32>) -> Result<Volume> {
    let ndim = data.ndim();
    if ndim != 3 && ndim != 4 {
        return Err(CoreError::UnsupportedDimensionality { ndim }.into());
    }
    let affine = header_affine(header);
    let direction = [
        [affine[0][0], affine[0][1], affine[0][2]],
        [affine[1][0], affine[1][1], affine[1][2]],
        [affine[2][0], affine[2][1], affine[2][2]],
    ];
    let volume = Volume::new(data.reversed_axes(), orientation_from_affine(&direction))?
        .with_affine(affine)
        .with_spacings(header_spacings(header));
    Ok(volume)
}

/// Voxel-to-scanner affine from the sform, else the qform, else the voxel
/// sizes alone.
pub fn header_affine(header: &NiftiHeader) -> Matrix4 {
    if header.sform_code > 0 {
        let rows = [header.srow_x, header.srow_y, header.srow_z];
        let mut affine = IDENTITY;
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                affine[row][col] = f64::from(*value);
            }
        }
        return affine;
    }

    let [px, py, pz] = header_spacings(header);
    if header.qform_code > 0 {
        let b = f64::from(header.quatern_b);
        let c = f64::from(header.quatern_c);
        let d = f64::from(header.quatern_d);
        let a = (1.0 - b * b - c * c - d * d).max(0.0).sqrt();
        let qfac = if header.pixdim[0] < 0.0 { -1.0 } else { 1.0 };
        let r = [
            [a * a + b * b - c * c - d * d, 2.0 * (b * c - a * d), 2.0 * (b * d + a * c)],
            [2.0 * (b * c + a * d), a * a + c * c - b * b - d * d, 2.0 * (c * d - a * b)],
            [2.0 * (b * d - a * c), 2.0 * (c * d + a * b), a * a + d * d - b * b - c * c],
        ];
        let offset = [
            f64::from(header.quatern_x),
            f64::from(header.quatern_y),
            f64::from(header.quatern_z),
        ];
        let mut affine = IDENTITY;
        for row in 0..3 {
            affine[row] = [
                r[row][0] * px,
                r[row][1] * py,
                r[row][2] * pz * qfac,
                offset[row],
            ];
        }
        return affine;
    }

    [
        [px, 0.0, 0.0, 0.0],
        [0.0, py, 0.0, 0.0],
        [0.0, 0.0, pz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Absolute voxel sizes; a missing (zero) or non-finite size counts as 1.
pub fn header_spacings(header: &NiftiHeader) -> [f64; 3] {
    let spacing = |value: f32| {
        let value = f64::from(value).abs();
        if value.is_finite() && value > 0.0 { value } else { 1.0 }
    };
    [
        spacing(header.pixdim[1]),
        spacing(header.pixdim[2]),
        spacing(header.pixdim[3]),
    ]
}
