use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use super::{AxisMapping, CoreError, LogicalAxis, Result, Volume};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlicePlane {
    #[default]
    Axial,
    Sagittal,
    Coronal,
}

impl SlicePlane {
    pub const ALL: [SlicePlane; 3] = [SlicePlane::Axial, SlicePlane::Sagittal, SlicePlane::Coronal];

    /// The logical axis pinned by this plane.
    pub fn fixed_axis(self) -> LogicalAxis {
        match self {
            SlicePlane::Axial => LogicalAxis::Z,
            SlicePlane::Sagittal => LogicalAxis::X,
            SlicePlane::Coronal => LogicalAxis::Y,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlicePlane::Axial => "axial",
            SlicePlane::Sagittal => "sagittal",
            SlicePlane::Coronal => "coronal",
        }
    }
}

impl fmt::Display for SlicePlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlicePlane {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let lower = value.trim().to_ascii_lowercase();
        SlicePlane::ALL
            .into_iter()
            .find(|plane| plane.name() == lower)
            .ok_or_else(|| format!("unknown slice plane `{value}` (axial, sagittal, coronal)"))
    }
}

/// A loaded volume together with the current view plane, slice index and
/// time point.
///
/// The slice index always lies inside `get_range()` for the current plane;
/// every change of plane, volume or time point re-validates it.
#[derive(Debug, Clone)]
pub struct ImageData {
    volume: Volume,
    axes: AxisMapping,
    plane: SlicePlane,
    slice_index: usize,
    time_index: usize,
}

impl ImageData {
    pub fn new(volume: Volume) -> Result<Self> {
        volume.validate()?;
        let axes = volume.axis_mapping()?;
        Ok(Self {
            volume,
            axes,
            plane: SlicePlane::default(),
            slice_index: 0,
            time_index: 0,
        })
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn set_volume(&mut self, volume: Volume) -> Result<()> {
        volume.validate()?;
        self.axes = volume.axis_mapping()?;
        self.volume = volume;
        self.time_index = self.time_index.min(self.volume.frames() - 1);
        self.set_slice_index(None);
        Ok(())
    }

    /// Position of each logical axis in the orientation vector.
    pub fn axis_mapping(&self) -> AxisMapping {
        self.axes
    }

    pub fn slice_plane(&self) -> SlicePlane {
        self.plane
    }

    pub fn set_slice_plane(&mut self, plane: SlicePlane) {
        self.plane = plane;
        self.set_slice_index(None);
    }

    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn time_index(&self) -> usize {
        self.time_index
    }

    pub fn get_range(&self) -> (usize, usize) {
        self.range_for(self.plane)
    }

    pub fn range_for(&self, plane: SlicePlane) -> (usize, usize) {
        let storage_axis = self.axes.display_order().get(plane.fixed_axis());
        let extent = self.volume.spatial_shape()[storage_axis];
        (0, extent - 1)
    }

    /// Clamps `index` into the current range; `None` re-validates the current
    /// index. Returns the index that was stored.
    pub fn set_slice_index(&mut self, index: Option<i64>) -> usize {
        let (min, max) = self.get_range();
        let requested = index.unwrap_or(self.slice_index as i64);
        let clamped = requested.clamp(min as i64, max as i64) as usize;
        if index.is_some() && clamped as i64 != requested {
            debug!(
                "event=slice_index_clamped module=model plane={} requested={} stored={}",
                self.plane, requested, clamped
            );
        }
        self.slice_index = clamped;
        clamped
    }

    pub fn set_time_index(&mut self, time: usize) -> usize {
        self.time_index = time.min(self.volume.frames() - 1);
        self.set_slice_index(None);
        self.time_index
    }

    /// Direct index slice: the plane's fixed axis is pinned to `index`, the
    /// two free axes are kept whole, in storage order.
    pub fn extract(&self, plane: SlicePlane, index: usize) -> Result<Array2<f32>> {
        let (_, max) = self.range_for(plane);
        if index > max {
            return Err(CoreError::SliceOutOfRange {
                plane: plane.name(),
                index,
                max,
            });
        }
        let frame = self.volume.frame(self.time_index)?;
        let storage_axis = self.axes.display_order().get(plane.fixed_axis());
        Ok(frame.index_axis(Axis(storage_axis), index).to_owned())
    }

    pub fn current_slice(&self) -> Result<Array2<f32>> {
        self.extract(self.plane, self.slice_index)
    }
}
