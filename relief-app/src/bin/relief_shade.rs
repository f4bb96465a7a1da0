use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bevy::log::{error, info, Level};
use clap::Parser;
use relief_app::{init_logging, load_config, open_raster, write_png};
use relief_scene::{ShaderOptions, SlopeShader};

/// Renders a slope-shaded relief PNG from a GeoTIFF elevation raster.
#[derive(Parser, Debug)]
#[command(name = "relief-shade", version)]
struct Args {
    /// Single-band GeoTIFF elevation raster
    input: PathBuf,
    /// Destination PNG
    output: PathBuf,
    /// JSON shader options
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<()> {
    let raster = open_raster(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let options: ShaderOptions = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None => ShaderOptions::default(),
    };

    info!(
        "Shading {}x{} raster",
        raster.grid.width(),
        raster.grid.height()
    );
    if let Some((low, high)) = raster.grid.elevation_range() {
        info!("Elevations from {} to {}", low, high);
    }
    let image = SlopeShader::new(options).shade(&raster.grid);
    write_png(&args.output, &image)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    return Ok(());
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(if args.verbose { Level::DEBUG } else { Level::INFO });
    if let Err(err) = run(&args) {
        error!("{:#}", err);
        return ExitCode::FAILURE;
    }
    return ExitCode::SUCCESS;
}
