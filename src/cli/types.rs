use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::model::{AxisMapping, SlicePlane};

#[derive(Debug, Parser)]
#[command(
    name = "niview",
    version,
    about = "Orientation-aware NIfTI slicing and marker files"
)]
pub(super) struct Cli {
    /// Viewer settings (YAML or JSON).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,
    #[arg(long, global = true, default_value = "warn")]
    pub(super) log_level: String,
    /// Write rotating log files here instead of stderr.
    #[arg(long, global = true)]
    pub(super) log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    Info {
        volume: PathBuf,
    },
    /// Writes one slice as PNG/JPEG or 32-bit float TIFF.
    Slice {
        volume: PathBuf,
        #[arg(long, default_value_t = SlicePlane::Axial)]
        plane: SlicePlane,
        /// Clamped into the plane's range.
        #[arg(long, allow_negative_numbers = true)]
        index: Option<i64>,
        #[arg(long, default_value_t = 0)]
        time: usize,
        #[arg(long)]
        output: PathBuf,
    },
    Markers {
        #[command(subcommand)]
        command: MarkersCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(super) enum MarkersCommand {
    Show {
        file: PathBuf,
    },
    /// Re-saves a marker file; with a volume, also writes the `.conv`
    /// scanner-space companion.
    Export {
        file: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        volume: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct PlaneRange {
    pub(super) plane: SlicePlane,
    pub(super) min: usize,
    pub(super) max: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct VolumeInfo {
    pub(super) shape: Vec<usize>,
    pub(super) frames: usize,
    pub(super) orientation: Vec<String>,
    pub(super) axis_mapping: AxisMapping,
    pub(super) display_order: AxisMapping,
    pub(super) ranges: Vec<PlaneRange>,
    pub(super) spacings: [f64; 3],
    pub(super) source: Option<String>,
    pub(super) min: Option<f32>,
    pub(super) max: Option<f32>,
}

#[derive(Debug, Serialize)]
pub(super) struct SliceOutput {
    pub(super) output: PathBuf,
    pub(super) plane: SlicePlane,
    pub(super) index: usize,
    pub(super) time: usize,
    pub(super) height: usize,
    pub(super) width: usize,
}
