use ndarray::{Array, IxDyn};

use super::{
    CoreError, ImageData, LogicalAxis, OrientationCode, OrientationError, SlicePlane, Volume,
    orientation_from_affine, resolve_axes,
};

use OrientationCode::{A2P, I2S, L2R, P2A, R2L, S2I};

fn coded_volume(shape: (usize, usize, usize), orientation: Vec<OrientationCode>) -> Volume {
    let data = Array::from_shape_fn(shape, |(a, b, c)| (a * 10_000 + b * 100 + c) as f32)
        .into_dyn();
    Volume::new(data, orientation).expect("volume")
}

#[test]
fn resolves_standard_orientation() {
    let mapping = resolve_axes(&[L2R, P2A, I2S]).expect("mapping");
    assert_eq!((mapping.x, mapping.y, mapping.z), (0, 1, 2));
    let display = mapping.display_order();
    assert_eq!((display.x, display.y, display.z), (2, 1, 0));
}

#[test]
fn resolves_flipped_and_permuted_codes() {
    let mapping = resolve_axes(&[A2P, S2I, R2L]).expect("mapping");
    assert_eq!(mapping.get(LogicalAxis::X), 2);
    assert_eq!(mapping.get(LogicalAxis::Y), 0);
    assert_eq!(mapping.get(LogicalAxis::Z), 1);
}

#[test]
fn missing_axis_pair_is_an_error() {
    let error = resolve_axes(&[L2R, R2L, I2S]).expect_err("y is missing");
    assert_eq!(
        error,
        OrientationError::MissingAxis {
            axis: LogicalAxis::Y
        }
    );
    assert!(matches!(
        resolve_axes(&[L2R, P2A]),
        Err(OrientationError::WrongLength { found: 2 })
    ));
}

#[test]
fn orientation_codes_parse_from_numbers_and_names() {
    assert_eq!(OrientationCode::try_from(4).expect("code"), A2P);
    assert!(OrientationCode::try_from(7).is_err());
    assert_eq!("s2i".parse::<OrientationCode>().expect("code"), S2I);
    assert_eq!(L2R.to_string(), "L2R");
}

#[test]
fn orientation_follows_affine_columns() {
    let ras = [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]];
    assert_eq!(orientation_from_affine(&ras), vec![L2R, P2A, I2S]);

    let oblique_lps = [[-0.9, 0.1, 0.0], [0.2, 0.0, -1.0], [0.0, 1.0, 0.1]];
    assert_eq!(orientation_from_affine(&oblique_lps), vec![R2L, I2S, A2P]);
}

#[test]
fn oblique_affine_never_repeats_a_world_axis() {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let rotated = [[h, -h, 0.0], [h, h, 0.0], [0.0, 0.0, 1.0]];
    let codes = orientation_from_affine(&rotated);
    assert_eq!(codes, vec![L2R, P2A, I2S]);
    let mapping = resolve_axes(&codes).expect("mapping");
    assert_eq!((mapping.x, mapping.y, mapping.z), (0, 1, 2));

    let swapped = [[0.0, h, -h], [0.0, -h, -h], [-1.0, 0.0, 0.0]];
    let codes = orientation_from_affine(&swapped);
    assert_eq!(codes, vec![S2I, L2R, A2P]);
    assert!(resolve_axes(&codes).is_ok());
}

#[test]
fn ranges_follow_display_order() {
    let data = Array::<f32, _>::zeros((50, 64, 80)).into_dyn();
    let volume = Volume::new(data, vec![L2R, P2A, I2S]).expect("volume");
    let image = ImageData::new(volume).expect("image");
    assert_eq!(image.range_for(SlicePlane::Axial), (0, 49));
    assert_eq!(image.range_for(SlicePlane::Sagittal), (0, 79));
    assert_eq!(image.range_for(SlicePlane::Coronal), (0, 63));
}

#[test]
fn ranges_for_permuted_storage() {
    let image = ImageData::new(coded_volume((5, 6, 7), vec![A2P, S2I, R2L])).expect("image");
    assert_eq!(image.range_for(SlicePlane::Axial), (0, 5));
    assert_eq!(image.range_for(SlicePlane::Sagittal), (0, 4));
    assert_eq!(image.range_for(SlicePlane::Coronal), (0, 6));
}

#[test]
fn extract_pins_the_fixed_axis() {
    let image = ImageData::new(coded_volume((2, 3, 4), vec![L2R, P2A, I2S])).expect("image");

    let axial = image.extract(SlicePlane::Axial, 1).expect("axial");
    assert_eq!(axial.dim(), (3, 4));
    assert_eq!(axial[[2, 3]], 10_203.0);

    let sagittal = image.extract(SlicePlane::Sagittal, 3).expect("sagittal");
    assert_eq!(sagittal.dim(), (2, 3));
    assert_eq!(sagittal[[1, 2]], 10_203.0);

    let coronal = image.extract(SlicePlane::Coronal, 0).expect("coronal");
    assert_eq!(coronal.dim(), (2, 4));
    assert_eq!(coronal[[1, 1]], 10_001.0);
}

#[test]
fn extract_rejects_out_of_range_index() {
    let image = ImageData::new(coded_volume((2, 3, 4), vec![L2R, P2A, I2S])).expect("image");
    let error = image
        .extract(SlicePlane::Axial, 2)
        .expect_err("only two axial slices");
    assert!(matches!(
        error,
        CoreError::SliceOutOfRange {
            index: 2,
            max: 1,
            ..
        }
    ));
}

#[test]
fn slice_index_is_clamped_both_ways() {
    let mut image = ImageData::new(coded_volume((5, 6, 7), vec![L2R, P2A, I2S])).expect("image");
    assert_eq!(image.set_slice_index(Some(100)), 4);
    assert_eq!(image.set_slice_index(Some(-3)), 0);
    assert_eq!(image.set_slice_index(Some(2)), 2);
    assert_eq!(image.set_slice_index(None), 2);
}

#[test]
fn plane_change_revalidates_index() {
    let mut image = ImageData::new(coded_volume((5, 6, 7), vec![L2R, P2A, I2S])).expect("image");
    image.set_slice_plane(SlicePlane::Sagittal);
    assert_eq!(image.set_slice_index(Some(6)), 6);
    image.set_slice_plane(SlicePlane::Axial);
    assert_eq!(image.slice_index(), 4);
    let slice = image.current_slice().expect("slice");
    assert_eq!(slice[[0, 0]], 40_000.0);
}

#[test]
fn volume_change_revalidates_index() {
    let mut image = ImageData::new(coded_volume((9, 6, 7), vec![L2R, P2A, I2S])).expect("image");
    image.set_slice_index(Some(8));
    image
        .set_volume(coded_volume((3, 6, 7), vec![L2R, P2A, I2S]))
        .expect("swap volume");
    assert_eq!(image.slice_index(), 2);
}

#[test]
fn four_dimensional_volume_selects_time_point() {
    let data = Array::from_shape_fn((3, 2, 2, 2), |(t, z, y, x)| {
        (t * 1000 + z * 100 + y * 10 + x) as f32
    })
    .into_dyn();
    let volume = Volume::new(data, vec![L2R, P2A, I2S]).expect("volume");
    assert_eq!(volume.frames(), 3);
    assert_eq!(volume.spatial_shape(), [2, 2, 2]);

    let mut image = ImageData::new(volume).expect("image");
    assert_eq!(image.set_time_index(10), 2);
    let axial = image.extract(SlicePlane::Axial, 1).expect("axial");
    assert_eq!(axial[[1, 0]], 2110.0);
}

#[test]
fn frame_rejects_missing_time_point() {
    let volume = coded_volume((2, 2, 2), vec![L2R, P2A, I2S]);
    assert!(volume.frame(0).is_ok());
    assert!(matches!(
        volume.frame(1),
        Err(CoreError::TimeOutOfRange {
            index: 1,
            frames: 1
        })
    ));
}

#[test]
fn volume_rejects_bad_layouts() {
    let flat = Array::<f32, _>::zeros((4, 4)).into_dyn();
    assert!(matches!(
        Volume::new(flat, vec![L2R, P2A, I2S]),
        Err(CoreError::UnsupportedDimensionality { ndim: 2 })
    ));

    let empty = Array::<f32, _>::zeros(IxDyn(&[2, 0, 2]));
    assert!(matches!(
        Volume::new(empty, vec![L2R, P2A, I2S]),
        Err(CoreError::ZeroSizedDimension { axis: 1 })
    ));

    let data = Array::<f32, _>::zeros((2, 2, 2)).into_dyn();
    assert!(matches!(
        Volume::new(data, vec![L2R, L2R, I2S]),
        Err(CoreError::Orientation(OrientationError::MissingAxis { .. }))
    ));
}

#[test]
fn min_max_scans_all_voxels() {
    let volume = coded_volume((2, 2, 2), vec![L2R, P2A, I2S]);
    assert_eq!(volume.min_max(), Some((0.0, 10_101.0)));
    let view = volume.frame(0).expect("frame");
    assert_eq!(view.dim(), (2, 2, 2));
}
