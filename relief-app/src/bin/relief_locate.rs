use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bevy::log::{error, Level};
use clap::Parser;
use relief_app::{init_logging, open_raster, Error};
use relief_scene::{GeoTransform, Sample};

/// Prints the pixel of a GeoTIFF containing a coordinate, its footprint and
/// its elevation.
#[derive(Parser, Debug)]
#[command(name = "relief-locate", version)]
struct Args {
    input: PathBuf,
    /// Degrees east
    #[arg(allow_negative_numbers = true)]
    longitude: f64,
    /// Degrees north
    #[arg(allow_negative_numbers = true)]
    latitude: f64,
}

fn run(args: &Args) -> Result<()> {
    let raster = open_raster(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let metadata = raster.metadata.ok_or(Error::MissingGeoreference)?;
    let transform = GeoTransform::new(&metadata)?;

    let Some(location) = transform.locate(args.longitude, args.latitude, &raster.grid) else {
        let bounds = transform.bounding_box(raster.grid.width(), raster.grid.height());
        anyhow::bail!(
            "({}, {}) lies outside the raster, which covers {:?}",
            args.longitude,
            args.latitude,
            bounds
        );
    };
    let (x, y) = location.pixel;
    let b = location.bounds;
    println!("pixel: {} {}", x, y);
    println!("bounds: {} {} {} {}", b.west, b.south, b.east, b.north);
    match location.sample {
        Sample::Elevation(elevation) => println!("elevation: {}", elevation),
        Sample::Missing => println!("elevation: missing"),
    }
    return Ok(());
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(Level::WARN);
    if let Err(err) = run(&args) {
        error!("{:#}", err);
        return ExitCode::FAILURE;
    }
    return ExitCode::SUCCESS;
}
