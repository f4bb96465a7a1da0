//! Shaded relief: hue and saturation from the local downslope direction,
//! lightness from elevation.
use bevy::log::info;
use bevy::math::{DVec2, DVec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_rgb, linear_from_two_points};
use crate::height_map_terrain::{HeightGrid, Sample};
use crate::math::clamp;

/// Elevation to lightness. Elevations between `low_elevation` and
/// `high_elevation` are interpolated from `high` down to `low`; higher ground
/// is darker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightnessScale {
    pub high_elevation: f64,
    pub low_elevation: f64,
    pub low: f64,
    pub high: f64,
    /// Lightness of samples at or below 0.
    pub sea_level: f64,
    /// Lightness of missing samples.
    pub missing: f64,
}
impl Default for LightnessScale {
    fn default() -> Self {
        LightnessScale {
            high_elevation: 900.0,
            low_elevation: 1.0,
            low: 0.25,
            high: 0.85,
            sea_level: 0.1,
            missing: 0.1,
        }
    }
}
impl LightnessScale {
    pub fn lightness(&self, sample: Sample) -> f64 {
        match sample {
            Sample::Missing => self.missing,
            Sample::Elevation(e) if e <= 0.0 => self.sea_level,
            Sample::Elevation(e) => {
                let line = linear_from_two_points(
                    (self.high_elevation, self.low),
                    (self.low_elevation, self.high),
                );
                clamp(line.eval(e), self.low, self.high)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderOptions {
    /// Hue for slopes whose downslope vector points toward -y.
    pub hue_down: f64,
    /// Hue for every other slope.
    pub hue_up: f64,
    pub max_saturation: f64,
    /// Elevation read for missing neighbours in the finite differences.
    pub missing_elevation: f64,
    pub lightness: LightnessScale,
}
impl Default for ShaderOptions {
    fn default() -> Self {
        ShaderOptions {
            hue_down: 0.0,
            hue_up: 0.6667,
            max_saturation: 0.4,
            missing_elevation: 0.0,
            lightness: LightnessScale::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeSample {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}
impl SlopeSample {
    pub fn to_rgb(&self) -> [u8; 3] {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

/// Row-major RGBA, four bytes per pixel, alpha always 255.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}
impl RgbaBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut pixels = vec![0; width * height * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (self.width * y + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SlopeShader {
    pub options: ShaderOptions,
}
impl SlopeShader {
    pub fn new(options: ShaderOptions) -> Self {
        Self { options }
    }

    fn elevation(&self, grid: &HeightGrid, x: usize, y: usize) -> f64 {
        grid.elevation_or(x, y, self.options.missing_elevation)
    }

    /// Planar part of the surface normal at interior pixel `(x, y)`, the
    /// downslope direction. Not normalized.
    pub fn downslope(&self, grid: &HeightGrid, x: usize, y: usize) -> DVec2 {
        assert!(
            x >= 1 && y >= 1 && x + 1 < grid.width() && y + 1 < grid.height(),
            "({}, {}) is not an interior pixel of a {}x{} grid",
            x,
            y,
            grid.width(),
            grid.height()
        );
        let x_slope = DVec3::new(
            2.0,
            0.0,
            self.elevation(grid, x + 1, y) - self.elevation(grid, x - 1, y),
        );
        let y_slope = DVec3::new(
            0.0,
            2.0,
            self.elevation(grid, x, y + 1) - self.elevation(grid, x, y - 1),
        );
        let normal = x_slope.cross(y_slope);
        DVec2::new(normal.x, normal.y)
    }

    pub fn shade_pixel(&self, grid: &HeightGrid, x: usize, y: usize) -> SlopeSample {
        let lightness = self.options.lightness.lightness(grid.sample(x, y));
        let v = self.downslope(grid, x, y);
        if v == DVec2::ZERO {
            return SlopeSample {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }
        let v = v.normalize();
        let (hue, saturation) = if v.y < 0.0 {
            (self.options.hue_down, self.options.max_saturation * -v.y)
        } else {
            (self.options.hue_up, self.options.max_saturation * v.y)
        };
        SlopeSample {
            hue,
            saturation,
            lightness,
        }
    }

    /// Shades every interior pixel; the one-pixel border keeps opaque black.
    /// Rows are independent and are spread over the rayon pool.
    pub fn shade(&self, grid: &HeightGrid) -> RgbaBuffer {
        let width = grid.width();
        let height = grid.height();
        let mut buffer = RgbaBuffer::new(width, height);
        if width < 3 || height < 3 {
            return buffer;
        }
        info!("Shading {}x{} pixels...", width, height);
        buffer
            .pixels
            .par_chunks_mut(width * 4)
            .enumerate()
            .skip(1)
            .take(height - 2)
            .for_each(|(y, row)| {
                for x in 1..width - 1 {
                    let [r, g, b] = self.shade_pixel(grid, x, y).to_rgb();
                    row[x * 4..x * 4 + 3].copy_from_slice(&[r, g, b]);
                }
            });
        buffer
    }
}
