//! Affine mapping between raster pixel indices and geographic coordinates.
//!
//! Rasters carry a pixel scale and a tiepoint (GeoTIFF `ModelPixelScale` and
//! `ModelTiepoint`). Together they describe an axis-aligned affine map with no
//! rotation or shear, so the inverse is written down directly instead of being
//! obtained by a general matrix inversion.
use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ScaleAxis};
use crate::geometry::Rectangle;
use crate::height_map_terrain::{HeightGrid, Sample};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterMetadata {
    /// `(sx, sy, sz)`. `sy` is positive in the file even though rows grow
    /// southward.
    pub pixel_scale: [f64; 3],
    /// `(px, py, pk, gx, gy, gz)`: raster point `(px, py, pk)` sits at model
    /// point `(gx, gy, gz)`.
    pub tiepoint: [f64; 6],
}
impl RasterMetadata {
    pub fn new(pixel_scale: [f64; 3], tiepoint: [f64; 6]) -> Self {
        Self {
            pixel_scale,
            tiepoint,
        }
    }
}

/// `x' = m0 + m1*a + m2*b; y' = m3 + m4*a + m5*b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix(pub [f64; 6]);

/// Evaluates `matrix` at `(a, b)`. With `round_to_int` both outputs are
/// truncated toward zero; pixel lookups want that, geographic outputs never do.
pub fn transform(a: f64, b: f64, matrix: &AffineMatrix, round_to_int: bool) -> DVec2 {
    let m = &matrix.0;
    let x = m[0] + m[1] * a + m[2] * b;
    let y = m[3] + m[4] * a + m[5] * b;
    if round_to_int {
        return DVec2::new(x.trunc(), y.trunc());
    }
    return DVec2::new(x, y);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub pixel_to_geo: AffineMatrix,
    pub geo_to_pixel: AffineMatrix,
}

/// Result of looking a geographic coordinate up in a raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub pixel: (usize, usize),
    pub bounds: Rectangle,
    pub sample: Sample,
}

impl GeoTransform {
    /// Builds both matrices from the scale and tiepoint.
    ///
    /// The tiepoint's raster offset is honoured: pixel `(px, py)` lands on
    /// `(gx, gy)`, so `x0 = gx - sx * px` and `y0 = gy + sy * py`. With the
    /// usual `px = py = 0` this is `lon = gx + sx * col`, `lat = gy - sy * row`.
    /// A nonzero offset shifts the grid relative to a mapping that ignores it.
    pub fn new(metadata: &RasterMetadata) -> Result<Self> {
        let [sx, sy, _sz] = metadata.pixel_scale;
        let [px, py, _pk, gx, gy, _gz] = metadata.tiepoint;
        if !metadata.pixel_scale.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteMetadata("pixel scale"));
        }
        if !metadata.tiepoint.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteMetadata("tiepoint"));
        }
        if sx == 0.0 {
            return Err(Error::DegenerateScale {
                axis: ScaleAxis::X,
                value: sx,
            });
        }
        if sy == 0.0 {
            return Err(Error::DegenerateScale {
                axis: ScaleAxis::Y,
                value: sy,
            });
        }
        // rows increase downward, latitude increases northward
        let sy = -sy;
        let x0 = gx - sx * px;
        let y0 = gy - sy * py;
        Ok(Self {
            pixel_to_geo: AffineMatrix([x0, sx, 0.0, y0, 0.0, sy]),
            geo_to_pixel: AffineMatrix([-x0 / sx, 1.0 / sx, 0.0, -y0 / sy, 0.0, 1.0 / sy]),
        })
    }
    /// Geographic `(longitude, latitude)` of the top-left corner of pixel `(col, row)`.
    pub fn to_geo(&self, col: f64, row: f64) -> DVec2 {
        return transform(col, row, &self.pixel_to_geo, false);
    }
    /// Fractional pixel position of a geographic coordinate.
    pub fn to_pixel_f64(&self, longitude: f64, latitude: f64) -> DVec2 {
        return transform(longitude, latitude, &self.geo_to_pixel, false);
    }
    /// Integer pixel index of a geographic coordinate, truncated toward zero.
    /// The index may lie outside the raster.
    pub fn to_pixel(&self, longitude: f64, latitude: f64) -> (i64, i64) {
        let p = transform(longitude, latitude, &self.geo_to_pixel, true);
        return (p.x as i64, p.y as i64);
    }
    /// The geographic area covered by pixel `(x, y)`.
    pub fn pixel_bounds(&self, x: usize, y: usize) -> Rectangle {
        let a = self.to_geo(x as f64, y as f64);
        let b = self.to_geo(x as f64 + 1.0, y as f64 + 1.0);
        return Rectangle::from_corners(a, b);
    }
    /// The geographic footprint of a `width` x `height` raster.
    pub fn bounding_box(&self, width: usize, height: usize) -> Rectangle {
        let a = self.to_geo(0.0, 0.0);
        let b = self.to_geo(width as f64, height as f64);
        return Rectangle::from_corners(a, b);
    }
    /// Looks up the pixel, its footprint and its elevation sample. `None` when
    /// the coordinate falls outside `grid`.
    pub fn locate(&self, longitude: f64, latitude: f64, grid: &HeightGrid) -> Option<Location> {
        // truncation alone would fold the strip just west/north of the raster
        // into column/row 0
        let p = self.to_pixel_f64(longitude, latitude);
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let (x, y) = self.to_pixel(longitude, latitude);
        let (x, y) = (x as usize, y as usize);
        let sample = grid.get(x, y)?;
        Some(Location {
            pixel: (x, y),
            bounds: self.pixel_bounds(x, y),
            sample,
        })
    }
}
