#![warn(
    clippy::unwrap_used,
    clippy::cast_lossless,
    clippy::unimplemented,
    clippy::expect_used
)]
//! Elevation raster to triangle mesh and shaded-relief image.
//!
//! Raster decoding and image encoding live in `relief-app`; this crate is the
//! numeric core: the pixel/geographic affine transform, the dense height-grid
//! tessellation with its model transforms, and slope shading.

pub mod affine_transform;
pub mod color;
pub mod ellipsoid;
mod error;
pub mod geometry;
pub mod height_map_terrain;
pub mod math;
pub mod slope_shader;

pub use affine_transform::{transform, AffineMatrix, GeoTransform, Location, RasterMetadata};
pub use color::{hsl_to_rgb, linear_from_two_points, LinearScale};
pub use ellipsoid::Ellipsoid;
pub use error::{Error, Result, ScaleAxis};
pub use geometry::Rectangle;
pub use height_map_terrain::*;
pub use math::{clamp, Cartographic};
pub use slope_shader::{LightnessScale, RgbaBuffer, ShaderOptions, SlopeSample, SlopeShader};
