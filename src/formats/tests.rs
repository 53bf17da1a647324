use std::fs::File;
use std::path::Path;

use ndarray::{Array, Array2};
use nifti::NiftiHeader;
use tempfile::tempdir;
use tiff::decoder::{Decoder, DecodingResult};

use super::util::{extension, to_u8_samples};
use super::{
    IoError, header_affine, header_spacings, read_volume, volume_from_header, write_slice,
};
use crate::model::OrientationCode;

fn ramp(height: usize, width: usize) -> Array2<f32> {
    Array::from_shape_fn((height, width), |(row, col)| (row * width + col) as f32)
}

#[test]
fn extension_understands_gzipped_nifti() {
    assert_eq!(extension(Path::new("/data/brain.NII.GZ")).expect("ext"), "nii.gz");
    assert_eq!(extension(Path::new("brain.nii")).expect("ext"), "nii");
    assert_eq!(extension(Path::new("slice.Png")).expect("ext"), "png");
    assert!(extension(Path::new("no_extension")).is_err());
}

#[test]
fn u8_samples_span_full_range() {
    assert_eq!(to_u8_samples(&[-1.0, 0.0, 1.0]), vec![0, 128, 255]);
    assert_eq!(to_u8_samples(&[0.0, 1.0]), vec![0, 255]);
    assert_eq!(to_u8_samples(&[5.0, 5.0]), vec![0, 0]);
}

#[test]
fn png_slice_has_first_row_at_bottom() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("axial.png");
    write_slice(&path, &ramp(2, 3)).expect("write png");

    let image = image::open(&path).expect("open png").to_luma8();
    assert_eq!(image.dimensions(), (3, 2));
    assert_eq!(image.get_pixel(0, 1).0[0], 0);
    assert_eq!(image.get_pixel(2, 0).0[0], 255);
}

#[test]
fn tiff_slice_keeps_raw_values() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("axial.tiff");
    let slice = ramp(2, 3);
    write_slice(&path, &slice).expect("write tiff");

    let mut decoder = Decoder::new(File::open(&path).expect("open tiff")).expect("decoder");
    assert_eq!(decoder.dimensions().expect("dimensions"), (3, 2));
    match decoder.read_image().expect("read") {
        DecodingResult::F32(values) => {
            assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        }
        _ => panic!("expected 32-bit float samples"),
    }
}

#[test]
fn unsupported_formats_error() {
    let dir = tempdir().expect("tempdir");
    let error = write_slice(dir.path().join("slice.bmpx"), &ramp(1, 1)).expect_err("bmpx");
    assert!(matches!(error, IoError::UnsupportedFormat(ref ext) if ext == "bmpx"));
    let error = read_volume(dir.path().join("volume.mgz")).expect_err("mgz");
    assert!(matches!(error, IoError::UnsupportedFormat(_)));
}

#[test]
fn sform_header_drives_orientation_and_layout() {
    let mut header = NiftiHeader::default();
    header.sform_code = 1;
    header.qform_code = 0;
    header.srow_x = [-2.0, 0.0, 0.0, 90.0];
    header.srow_y = [0.0, 2.0, 0.0, -126.0];
    header.srow_z = [0.0, 0.0, 3.0, -72.0];
    header.pixdim = [1.0, 2.0, 2.0, 3.0, 1.0, 1.0, 1.0, 1.0];

    let data = Array::<f32, _>::zeros((4, 5, 6)).into_dyn();
    let volume = volume_from_header(&header, data).expect("volume");
    assert_eq!(volume.shape(), &[6, 5, 4]);
    assert_eq!(
        volume.orientation,
        vec![
            OrientationCode::R2L,
            OrientationCode::P2A,
            OrientationCode::I2S
        ]
    );
    assert_eq!(volume.spacings, [2.0, 2.0, 3.0]);
    let affine = volume.affine.expect("affine");
    assert_eq!(affine[0], [-2.0, 0.0, 0.0, 90.0]);
    assert_eq!(affine[3], [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn identity_qform_scales_by_voxel_size() {
    let mut header = NiftiHeader::default();
    header.sform_code = 0;
    header.qform_code = 1;
    header.quatern_b = 0.0;
    header.quatern_c = 0.0;
    header.quatern_d = 0.0;
    header.quatern_x = 1.0;
    header.quatern_y = 2.0;
    header.quatern_z = 3.0;
    header.pixdim = [1.0, 0.5, 0.5, 2.0, 1.0, 1.0, 1.0, 1.0];

    let affine = header_affine(&header);
    assert_eq!(affine[0], [0.5, 0.0, 0.0, 1.0]);
    assert_eq!(affine[1], [0.0, 0.5, 0.0, 2.0]);
    assert_eq!(affine[2], [0.0, 0.0, 2.0, 3.0]);
}

#[test]
fn four_dimensional_header_data_puts_time_first() {
    let mut header = NiftiHeader::default();
    header.sform_code = 0;
    header.qform_code = 0;
    header.pixdim = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];

    let data = Array::<f32, _>::zeros((4, 5, 6, 2)).into_dyn();
    let volume = volume_from_header(&header, data).expect("volume");
    assert_eq!(volume.shape(), &[2, 6, 5, 4]);
    assert_eq!(volume.frames(), 2);

    let flat = Array::<f32, _>::zeros((4, 5)).into_dyn();
    assert!(matches!(
        volume_from_header(&header, flat),
        Err(IoError::Core(_))
    ));
}

#[test]
fn unusable_voxel_sizes_fall_back_to_one() {
    let mut header = NiftiHeader::default();
    header.sform_code = 0;
    header.qform_code = 0;
    header.pixdim = [1.0, -2.5, 0.0, f32::NAN, 1.0, 1.0, 1.0, 1.0];
    assert_eq!(header_spacings(&header), [2.5, 1.0, 1.0]);

    header.pixdim[2] = f32::INFINITY;
    let data = Array::<f32, _>::zeros((2, 3, 4)).into_dyn();
    let volume = volume_from_header(&header, data).expect("volume");
    assert_eq!(volume.spacings, [2.5, 1.0, 1.0]);
    assert!(volume.validate().is_ok());
}
