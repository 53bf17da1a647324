use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::OrientationError;

/// Anatomical axis of the viewer: x runs left-right, y posterior-anterior,
/// z inferior-superior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalAxis {
    X,
    Y,
    Z,
}

impl fmt::Display for LogicalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalAxis::X => "x",
            LogicalAxis::Y => "y",
            LogicalAxis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Direction of one storage axis, numbered as in `nifti1_io.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrientationCode {
    L2R = 1,
    R2L = 2,
    P2A = 3,
    A2P = 4,
    I2S = 5,
    S2I = 6,
}

impl OrientationCode {
    pub const ALL: [OrientationCode; 6] = [
        OrientationCode::L2R,
        OrientationCode::R2L,
        OrientationCode::P2A,
        OrientationCode::A2P,
        OrientationCode::I2S,
        OrientationCode::S2I,
    ];

    pub fn axis(self) -> LogicalAxis {
        match self {
            OrientationCode::L2R | OrientationCode::R2L => LogicalAxis::X,
            OrientationCode::P2A | OrientationCode::A2P => LogicalAxis::Y,
            OrientationCode::I2S | OrientationCode::S2I => LogicalAxis::Z,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OrientationCode::L2R => "L2R",
            OrientationCode::R2L => "R2L",
            OrientationCode::P2A => "P2A",
            OrientationCode::A2P => "A2P",
            OrientationCode::I2S => "I2S",
            OrientationCode::S2I => "S2I",
        }
    }
}

impl fmt::Display for OrientationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for OrientationCode {
    type Error = OrientationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        OrientationCode::ALL
            .into_iter()
            .find(|code| *code as i32 == value)
            .ok_or_else(|| OrientationError::UnknownCode(value.to_string()))
    }
}

impl FromStr for OrientationCode {
    type Err = OrientationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_ascii_uppercase();
        OrientationCode::ALL
            .into_iter()
            .find(|code| code.name() == upper)
            .ok_or_else(|| OrientationError::UnknownCode(value.to_string()))
    }
}

/// Position of each logical axis, either in the orientation vector
/// (`resolve_axes`) or in storage order (`display_order`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMapping {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl AxisMapping {
    pub fn get(&self, axis: LogicalAxis) -> usize {
        match axis {
            LogicalAxis::X => self.x,
            LogicalAxis::Y => self.y,
            LogicalAxis::Z => self.z,
        }
    }

    /// Storage layout is the reverse of the orientation vector, so the storage
    /// axis of each logical axis is `2 - index`.
    pub fn display_order(&self) -> AxisMapping {
        AxisMapping {
            x: 2 - self.x,
            y: 2 - self.y,
            z: 2 - self.z,
        }
    }
}

pub fn resolve_axes(codes: &[OrientationCode]) -> Result<AxisMapping, OrientationError> {
    if codes.len() != 3 {
        return Err(OrientationError::WrongLength { found: codes.len() });
    }
    Ok(AxisMapping {
        x: find_pair(codes, OrientationCode::L2R, OrientationCode::R2L, LogicalAxis::X)?,
        y: find_pair(codes, OrientationCode::P2A, OrientationCode::A2P, LogicalAxis::Y)?,
        z: find_pair(codes, OrientationCode::I2S, OrientationCode::S2I, LogicalAxis::Z)?,
    })
}

fn find_pair(
    codes: &[OrientationCode],
    preferred: OrientationCode,
    fallback: OrientationCode,
    axis: LogicalAxis,
) -> Result<usize, OrientationError> {
    codes
        .iter()
        .position(|code| *code == preferred)
        .or_else(|| codes.iter().position(|code| *code == fallback))
        .ok_or(OrientationError::MissingAxis { axis })
}

/// Derives one code per voxel axis from the direction part of a voxel-to-RAS
/// affine. Entries are taken largest magnitude first, and each pairs one
/// voxel column with one world row that neither has claimed yet, so every
/// world axis is used exactly once. The sign of the entry picks the direction.
pub fn orientation_from_affine(direction: &[[f64; 3]; 3]) -> Vec<OrientationCode> {
    let mut entries = (0..3)
        .flat_map(|row| (0..3).map(move |col| (row, col)))
        .collect::<Vec<_>>();
    entries.sort_by(|&(ra, ca), &(rb, cb)| {
        direction[rb][cb].abs().total_cmp(&direction[ra][ca].abs())
    });

    let mut row_taken = [false; 3];
    let mut assigned: [Option<(usize, bool)>; 3] = [None; 3];
    for (row, col) in entries {
        if row_taken[row] || assigned[col].is_some() {
            continue;
        }
        row_taken[row] = true;
        assigned[col] = Some((row, direction[row][col] >= 0.0));
    }

    assigned
        .iter()
        .enumerate()
        .map(|(col, slot)| match slot.unwrap_or((col, true)) {
            (0, true) => OrientationCode::L2R,
            (0, false) => OrientationCode::R2L,
            (1, true) => OrientationCode::P2A,
            (1, false) => OrientationCode::A2P,
            (_, true) => OrientationCode::I2S,
            (_, false) => OrientationCode::S2I,
        })
        .collect()
}
