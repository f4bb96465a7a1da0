use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    X,
    Y,
}
impl fmt::Display for ScaleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScaleAxis::X => "x",
            ScaleAxis::Y => "y",
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("pixel scale along {axis} is {value}; the geo-to-pixel transform is undefined")]
    DegenerateScale { axis: ScaleAxis, value: f64 },
    #[error("raster metadata contains a non-finite value: {0}")]
    NonFiniteMetadata(&'static str),
    #[error("height grid {width}x{height} is empty")]
    EmptyGrid { width: usize, height: usize },
    #[error("a {width}x{height} grid does not fit 32-bit vertex ids")]
    TooManyVertices { width: usize, height: usize },
    #[error("height grid expects {expected} samples but got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
