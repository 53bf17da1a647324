pub mod cli;
pub mod config;
pub mod formats;
pub mod logging;
pub mod markers;
pub mod model;
pub mod runtime;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
