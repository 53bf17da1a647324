use clap::Parser;
use serde::Serialize;

use crate::config::{ViewerConfig, load_config};
use crate::logging::init_logging;
use crate::markers::read_markers;
use crate::model::SlicePlane;
use crate::runtime::ViewerContext;

use super::types::{Cli, Commands, MarkersCommand, PlaneRange, SliceOutput, VolumeInfo};

fn print_json(value: &impl Serialize) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_dir.as_deref())?;

    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|error| error.to_string())?,
        None => ViewerConfig::default(),
    };
    let mut app = ViewerContext::with_config(config);

    match cli.command {
        Commands::Info { volume } => {
            let image = app.load_image(&volume).map_err(|error| error.to_string())?;
            let data = image.volume();
            let (min, max) = data.min_max().unzip();
            let info = VolumeInfo {
                shape: data.shape().to_vec(),
                frames: data.frames(),
                orientation: data.orientation.iter().map(ToString::to_string).collect(),
                axis_mapping: image.axis_mapping(),
                display_order: image.axis_mapping().display_order(),
                ranges: SlicePlane::ALL
                    .iter()
                    .map(|plane| {
                        let (min, max) = image.range_for(*plane);
                        PlaneRange {
                            plane: *plane,
                            min,
                            max,
                        }
                    })
                    .collect(),
                spacings: data.spacings,
                source: data.source.as_ref().map(|path| path.display().to_string()),
                min,
                max,
            };
            print_json(&info)?;
        }
        Commands::Slice {
            volume,
            plane,
            index,
            time,
            output,
        } => {
            app.load_image(&volume).map_err(|error| error.to_string())?;
            let image = app.image_mut().map_err(|error| error.to_string())?;
            image.set_slice_plane(plane);
            let time = image.set_time_index(time);
            let index = image.set_slice_index(index);
            let slice = image.current_slice().map_err(|error| error.to_string())?;
            app.io_service()
                .write_slice(&output, &slice)
                .map_err(|error| error.to_string())?;
            let (height, width) = slice.dim();
            print_json(&SliceOutput {
                output,
                plane,
                index,
                time,
                height,
                width,
            })?;
        }
        Commands::Markers { command } => match command {
            MarkersCommand::Show { file } => {
                let markers = read_markers(&file).map_err(|error| error.to_string())?;
                print_json(&markers)?;
            }
            MarkersCommand::Export {
                file,
                output,
                volume,
            } => {
                if let Some(volume) = volume {
                    app.load_image(&volume).map_err(|error| error.to_string())?;
                }
                app.markers_mut()
                    .load_markers_from(&file)
                    .map_err(|error| error.to_string())?;
                let report = app
                    .markers()
                    .save_markers_as(&output)
                    .map_err(|error| error.to_string())?;
                print_json(&report)?;
            }
        },
    }

    Ok(())
}
