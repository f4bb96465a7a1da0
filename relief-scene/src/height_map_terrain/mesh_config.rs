use bevy::log::info;
use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use super::{
    Centering, ElevationPolicy, HeightGrid, Mesh, MeshBuilder, ModelTransform,
    ModelTransformPipeline, Scale,
};
use crate::affine_transform::GeoTransform;
use crate::error::Result;
use crate::ellipsoid::{Ellipsoid, EARTH_RADIUS};
use crate::math::Cartographic;

/// Maps a pixel and its normalized elevation to a model-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionMapping {
    /// Places the grid on a sphere. Column `x` sits at
    /// `corner_longitude + x * step[0]` and row `y` at
    /// `corner_latitude - y * step[1]` (degrees). Without a step, one degree
    /// is spread over the grid width: `1 / (W - 1)`.
    Spherical {
        corner_longitude: f64,
        corner_latitude: f64,
        step: Option<[f64; 2]>,
        radius: f64,
    },
    /// `(x, -y, elevation * elevation_scale)`
    Planar { elevation_scale: f64 },
}
impl PositionMapping {
    /// Spherical mapping anchored at the raster's own top-left corner and
    /// pixel size.
    pub fn from_geo_transform(transform: &GeoTransform) -> Self {
        let corner = transform.to_geo(0.0, 0.0);
        let m = &transform.pixel_to_geo.0;
        PositionMapping::Spherical {
            corner_longitude: corner.x,
            corner_latitude: corner.y,
            step: Some([m[1], -m[5]]),
            radius: EARTH_RADIUS,
        }
    }
    pub fn position(&self, grid: &HeightGrid, x: usize, y: usize, elevation: f64) -> DVec3 {
        match *self {
            PositionMapping::Spherical {
                corner_longitude,
                corner_latitude,
                step,
                radius,
            } => {
                let [step_longitude, step_latitude] = step.unwrap_or_else(|| {
                    let s = 1.0 / grid.width().saturating_sub(1).max(1) as f64;
                    [s, s]
                });
                let cartographic = Cartographic::from_degrees(
                    corner_longitude + x as f64 * step_longitude,
                    corner_latitude - y as f64 * step_latitude,
                    elevation,
                );
                Ellipsoid::sphere(radius).cartographic_to_cartesian(&cartographic)
            }
            PositionMapping::Planar { elevation_scale } => {
                DVec3::new(x as f64, -(y as f64), elevation * elevation_scale)
            }
        }
    }
}

/// Everything needed to turn a height grid into a finished mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    pub mapping: PositionMapping,
    #[serde(default)]
    pub policy: ElevationPolicy,
    #[serde(default)]
    pub pipeline: ModelTransformPipeline,
}
impl Default for MeshConfig {
    fn default() -> Self {
        MeshPreset::Globe.config()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshPreset {
    /// Spherical Earth positions, recentred on the corner midpoint and
    /// shrunk to kilometres.
    Globe,
    /// Flat grid with exaggerated-down elevations, centred and fitted to ten
    /// units for modelling tools.
    Blender,
}
impl MeshPreset {
    pub fn config(&self) -> MeshConfig {
        match self {
            MeshPreset::Globe => MeshConfig {
                mapping: PositionMapping::Spherical {
                    corner_longitude: -123.0,
                    corner_latitude: 37.0,
                    step: None,
                    radius: EARTH_RADIUS,
                },
                policy: ElevationPolicy::default(),
                pipeline: ModelTransformPipeline::new(vec![
                    ModelTransform::Recenter(Centering::CornerMidpoint),
                    ModelTransform::Scale(Scale::Uniform(0.001)),
                ]),
            },
            MeshPreset::Blender => MeshConfig {
                mapping: PositionMapping::Planar {
                    elevation_scale: 1.0,
                },
                policy: ElevationPolicy::scaled(0.05),
                pipeline: ModelTransformPipeline::new(vec![
                    ModelTransform::Recenter(Centering::GridHalfExtent),
                    ModelTransform::Scale(Scale::FitWidth(10.0)),
                ]),
            },
        }
    }
}

/// Builds the mesh and runs the configured transform pipeline over it.
pub fn generate_mesh(grid: &HeightGrid, config: &MeshConfig) -> Result<Mesh> {
    let builder = MeshBuilder::new(config.policy);
    let mut mesh = builder.build(grid, |x, y, elevation| {
        config.mapping.position(grid, x, y, elevation)
    })?;
    info!("Various coordinate transformations...");
    config.pipeline.apply(&mut mesh);
    return Ok(mesh);
}
