use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::Matrix4;

use super::{CoordinateLookup, Marker, MarkerError, Result, ScannerTransform, truncate_center};

/// Outcome of a marker export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub markers_path: PathBuf,
    pub marker_count: usize,
    pub conversion_path: Option<PathBuf>,
    pub failed_lookups: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistrationFile {
    matrix: Matrix4,
}

/// `<path>.conv`, next to the marker file.
pub fn companion_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".conv");
    PathBuf::from(name)
}

pub(crate) fn marker_lines(markers: &[Marker]) -> Vec<String> {
    let mut lines = markers.iter().map(Marker::to_string).collect::<Vec<_>>();
    lines.sort();
    lines
}

/// One line per marker; a failed lookup is recorded in place of the result.
pub(crate) fn conversion_lines(
    markers: &[Marker],
    transform: &ScannerTransform,
    lookup: &dyn CoordinateLookup,
) -> (Vec<String>, usize) {
    let mut failed = 0;
    let mut lines = markers
        .iter()
        .map(|marker| {
            let center = marker.scanner_center(transform);
            let result = match lookup.lookup(truncate_center(center)) {
                Ok(result) => single_line(&result),
                Err(error) => {
                    failed += 1;
                    warn!(
                        "event=coordinate_lookup module=markers status=error marker={} error={error}",
                        marker.id()
                    );
                    format!("lookup failed: {error}")
                }
            };
            format!(
                "{:.3}, {:.3}, {:.3}, {result}",
                center[0], center[1], center[2]
            )
        })
        .collect::<Vec<_>>();
    lines.sort();
    (lines, failed)
}

/// Joins the non-blank lines of a lookup reply with spaces.
fn single_line(reply: &str) -> String {
    reply
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Parses every non-blank line; the first malformed line fails the whole read.
pub fn read_markers(path: impl AsRef<Path>) -> Result<Vec<Marker>> {
    let raw = fs::read_to_string(path)?;
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.parse::<Marker>().map_err(|source| MarkerError::Parse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

pub fn save_registration(path: impl AsRef<Path>, matrix: &Matrix4) -> Result<()> {
    let serialized = serde_json::to_string_pretty(&RegistrationFile { matrix: *matrix })?;
    fs::write(path, serialized)?;
    Ok(())
}

pub fn load_registration(path: impl AsRef<Path>) -> Result<Matrix4> {
    let raw = fs::read_to_string(path)?;
    let file = serde_json::from_str::<RegistrationFile>(&raw)?;
    Ok(file.matrix)
}
