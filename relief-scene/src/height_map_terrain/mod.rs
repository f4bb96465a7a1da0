use serde::{Deserialize, Serialize};

mod height_grid;
mod mesh_config;
mod mesh_document;
mod model_transform;
mod terrain_mesh;

pub use height_grid::*;
pub use mesh_config::*;
pub use mesh_document::*;
pub use model_transform::*;
pub use terrain_mesh::*;

/// How raw samples become mesh elevations before a position is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationPolicy {
    /// Elevation used for a missing sample.
    pub missing: f64,
    /// Replace samples `<= 0` with 0.
    pub floor_non_positive: bool,
    /// Linear factor applied after the two rules above.
    pub scale: f64,
}
impl Default for ElevationPolicy {
    fn default() -> Self {
        ElevationPolicy {
            missing: 0.0,
            floor_non_positive: true,
            scale: 1.0,
        }
    }
}
impl ElevationPolicy {
    pub fn scaled(scale: f64) -> Self {
        ElevationPolicy {
            scale,
            ..Default::default()
        }
    }
    pub fn normalize(&self, sample: Sample) -> f64 {
        let elevation = match sample {
            Sample::Missing => self.missing,
            Sample::Elevation(e) if self.floor_non_positive && e <= 0.0 => 0.0,
            Sample::Elevation(e) => e,
        };
        return elevation * self.scale;
    }
}
