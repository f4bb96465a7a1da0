//! HSL to RGB conversion and the linear scales used for elevation shading.
use serde::{Deserialize, Serialize};

use crate::math::clamp;

/// `h`, `s`, `l` in `[0, 1]` to 8-bit RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    if s == 0.0 {
        let v = to_channel(l);
        return [v, v, v];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    ]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(v: f64) -> u8 {
    (clamp(v, 0.0, 1.0) * 255.0).round() as u8
}

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub slope: f64,
    pub intercept: f64,
}
impl LinearScale {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// The line through `(x1, y1)` and `(x2, y2)`. `x1 == x2` has no line and
/// yields a constant at `y1`.
pub fn linear_from_two_points((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> LinearScale {
    if x1 == x2 {
        return LinearScale {
            slope: 0.0,
            intercept: y1,
        };
    }
    let slope = (y2 - y1) / (x2 - x1);
    LinearScale {
        slope,
        intercept: y1 - slope * x1,
    }
}
