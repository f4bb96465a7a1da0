use crate::error::{Error, Result};

/// One raster cell. Missing is kept distinct from a genuine elevation of 0 so
/// that sea level and nodata can be told apart downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Elevation(f64),
    Missing,
}
impl Sample {
    pub fn elevation(&self) -> Option<f64> {
        match self {
            Sample::Elevation(e) => Some(*e),
            Sample::Missing => None,
        }
    }
    pub fn is_missing(&self) -> bool {
        matches!(self, Sample::Missing)
    }
}
impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Sample::Elevation(value)
    }
}

/// Immutable row-major grid of elevation samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    samples: Vec<Sample>,
}
impl HeightGrid {
    pub fn new(width: usize, height: usize, samples: Vec<Sample>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        let expected = width * height;
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }
    pub fn from_elevations(width: usize, height: usize, elevations: Vec<f64>) -> Result<Self> {
        let samples = elevations.into_iter().map(Sample::Elevation).collect();
        return HeightGrid::new(width, height, samples);
    }
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Sample,
    ) -> Result<Self> {
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        return HeightGrid::new(width, height, samples);
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
    /// Row-major position of `(x, y)`; also the vertex id of that pixel.
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "sample ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.width * y + x
    }
    /// Bounds-checked lookup. Panics outside `[0, width) x [0, height)`.
    pub fn sample(&self, x: usize, y: usize) -> Sample {
        self.samples[self.index(x, y)]
    }
    pub fn get(&self, x: usize, y: usize) -> Option<Sample> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.samples[self.width * y + x])
    }
    /// Elevation at `(x, y)`, with `missing` standing in for absent samples.
    pub fn elevation_or(&self, x: usize, y: usize, missing: f64) -> f64 {
        self.sample(x, y).elevation().unwrap_or(missing)
    }
    pub fn missing_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_missing()).count()
    }
    /// `(min, max)` over present samples, `None` when every sample is missing.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(Sample::elevation)
            .fold(None, |range, e| match range {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            })
    }
}
