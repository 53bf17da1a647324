use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::model::Matrix4;

use super::ParseMarkerError;

/// RGB color with components in `0..=1`.
pub type Rgb = [f64; 3];

static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a marker. Two markers at the same place are still distinct
/// entries; clones share the id of the marker they were cloned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MarkerId(u64);

impl MarkerId {
    fn next() -> Self {
        Self(NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    id: MarkerId,
    pub center: [f64; 3],
    pub radius: f64,
    pub color: Rgb,
    pub label: String,
}

impl Marker {
    pub fn new(center: [f64; 3], radius: f64, color: Rgb) -> Self {
        Self {
            id: MarkerId::next(),
            center,
            radius,
            color,
            label: String::new(),
        }
    }

    /// Line breaks would split the saved line, so they become spaces.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into().replace(['\r', '\n'], " ");
        self
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Equal position, size, color and label, regardless of identity.
    pub fn same_placement(&self, other: &Marker) -> bool {
        self.center == other.center
            && self.radius == other.radius
            && self.color == other.color
            && self.label == other.label
    }

    pub fn scanner_center(&self, transform: &ScannerTransform) -> [f64; 3] {
        transform.apply(self.center)
    }
}

/// `x,y,z,radius,r,g,b,label`; the label is everything after the seventh
/// comma. Line breaks in the label are written as spaces.
impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.center;
        let [r, g, b] = self.color;
        let label = self.label.replace(['\r', '\n'], " ");
        write!(f, "{x},{y},{z},{},{r},{g},{b},{label}", self.radius)
    }
}

impl FromStr for Marker {
    type Err = ParseMarkerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields = line.splitn(8, ',').collect::<Vec<_>>();
        if fields.len() < 7 {
            return Err(ParseMarkerError::new(format!(
                "expected at least 7 comma-separated fields, found {}",
                fields.len()
            )));
        }
        let mut numbers = [0.0_f64; 7];
        for (slot, (index, raw)) in numbers.iter_mut().zip(fields.iter().enumerate()) {
            *slot = raw.trim().parse::<f64>().map_err(|error| {
                ParseMarkerError::new(format!("field {} (`{}`): {error}", index + 1, raw.trim()))
            })?;
        }
        let label = fields.get(7).copied().unwrap_or_default();
        Ok(Marker::new(
            [numbers[0], numbers[1], numbers[2]],
            numbers[3],
            [numbers[4], numbers[5], numbers[6]],
        )
        .with_label(label))
    }
}

/// Voxel-to-scanner transform of the loaded volume. Marker centers are in
/// millimetres along the voxel axes; dividing by the spacings gives voxel
/// indices, which the qform maps into scanner space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScannerTransform {
    pub qform: Matrix4,
    pub spacings: [f64; 3],
}

impl ScannerTransform {
    pub fn new(qform: Matrix4, spacings: [f64; 3]) -> Self {
        Self { qform, spacings }
    }

    pub fn apply(&self, center: [f64; 3]) -> [f64; 3] {
        let voxel = [
            center[0] / self.spacings[0],
            center[1] / self.spacings[1],
            center[2] / self.spacings[2],
        ];
        let mut out = [0.0; 3];
        for (row, value) in out.iter_mut().enumerate() {
            let m = self.qform[row];
            *value = m[0] * voxel[0] + m[1] * voxel[1] + m[2] * voxel[2] + m[3];
        }
        out
    }
}
