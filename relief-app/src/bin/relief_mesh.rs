use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bevy::log::{error, info, warn, Level};
use clap::{Parser, ValueEnum};
use relief_app::{init_logging, load_config, open_raster, write_mesh};
use relief_scene::{
    generate_mesh, GeoTransform, MeshConfig, MeshPreset, PositionMapping, RasterMetadata,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Globe,
    Blender,
}
impl From<Preset> for MeshPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Globe => MeshPreset::Globe,
            Preset::Blender => MeshPreset::Blender,
        }
    }
}

/// Triangulates a GeoTIFF elevation raster into a JSON mesh.
#[derive(Parser, Debug)]
#[command(name = "relief-mesh", version)]
struct Args {
    /// Single-band GeoTIFF elevation raster
    input: PathBuf,
    /// Destination of the `{"vertices", "faces"}` JSON document
    output: PathBuf,
    #[arg(long, value_enum, default_value = "globe")]
    preset: Preset,
    /// JSON mesh options replacing the preset
    #[arg(long)]
    config: Option<PathBuf>,
    /// Anchor spherical positions at the raster's own tiepoint and pixel size
    #[arg(long)]
    georeferenced: bool,
    #[arg(short, long)]
    verbose: bool,
}

/// The preset or options file, with `--georeferenced` applied.
fn resolve_config(args: &Args, metadata: Option<&RasterMetadata>) -> Result<MeshConfig> {
    let mut config: MeshConfig = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None => MeshPreset::from(args.preset).config(),
    };
    if args.georeferenced {
        let spherical = matches!(config.mapping, PositionMapping::Spherical { .. });
        match (metadata, spherical) {
            (Some(metadata), true) => {
                let transform = GeoTransform::new(metadata)?;
                config.mapping = PositionMapping::from_geo_transform(&transform);
            }
            (None, _) => warn!("{} has no georeferencing", args.input.display()),
            (Some(_), false) => warn!("--georeferenced has no effect on a planar mapping"),
        }
    }
    return Ok(config);
}

fn run(args: &Args) -> Result<()> {
    let raster = open_raster(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let config = resolve_config(args, raster.metadata.as_ref())?;

    info!(
        "{}x{} grid, {} missing samples",
        raster.grid.width(),
        raster.grid.height(),
        raster.grid.missing_count()
    );
    if let Some((low, high)) = raster.grid.elevation_range() {
        info!("Elevations from {} to {}", low, high);
    }

    let mesh = generate_mesh(&raster.grid, &config)?;
    write_mesh(&args.output, &mesh)
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn one_degree_tile() -> RasterMetadata {
        let step = 1.0 / 3600.0;
        RasterMetadata::new([step, step, 0.0], [0.0, 0.0, 0.0, -122.0, 38.0, 0.0])
    }

    #[test]
    fn requires_input_and_output() {
        let err = Args::try_parse_from(["relief-mesh", "in.tif"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        let err = Args::try_parse_from(["relief-mesh"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn defaults_to_the_globe_preset() {
        let args = Args::try_parse_from(["relief-mesh", "in.tif", "out.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.tif"));
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.preset, Preset::Globe);
        assert!(!args.georeferenced);
        assert_eq!(
            resolve_config(&args, Some(&one_degree_tile())).unwrap(),
            MeshPreset::Globe.config()
        );
    }

    #[test]
    fn preset_flag() {
        let args =
            Args::try_parse_from(["relief-mesh", "in.tif", "out.json", "--preset", "blender"])
                .unwrap();
        assert_eq!(args.preset, Preset::Blender);
        let err = Args::try_parse_from(["relief-mesh", "in.tif", "out.json", "--preset", "moon"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn georeferenced_globe_uses_the_tiepoint() {
        let args =
            Args::try_parse_from(["relief-mesh", "in.tif", "out.json", "--georeferenced"]).unwrap();
        let config = resolve_config(&args, Some(&one_degree_tile())).unwrap();
        match config.mapping {
            PositionMapping::Spherical {
                corner_longitude,
                corner_latitude,
                step,
                ..
            } => {
                assert_eq!((corner_longitude, corner_latitude), (-122.0, 38.0));
                let [lon_step, lat_step] = step.unwrap();
                assert!((lon_step - 1.0 / 3600.0).abs() < 1e-15);
                assert!((lat_step - 1.0 / 3600.0).abs() < 1e-15);
            }
            other => panic!("expected a spherical mapping, got {other:?}"),
        }
        assert_eq!(config.pipeline, MeshPreset::Globe.config().pipeline);
    }

    #[test]
    fn georeferenced_without_tags_or_on_planar_keeps_the_preset() {
        let args =
            Args::try_parse_from(["relief-mesh", "in.tif", "out.json", "--georeferenced"]).unwrap();
        assert_eq!(resolve_config(&args, None).unwrap(), MeshPreset::Globe.config());

        let args = Args::try_parse_from([
            "relief-mesh",
            "in.tif",
            "out.json",
            "--georeferenced",
            "--preset",
            "blender",
        ])
        .unwrap();
        assert_eq!(
            resolve_config(&args, Some(&one_degree_tile())).unwrap(),
            MeshPreset::Blender.config()
        );
    }
}
