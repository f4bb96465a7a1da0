use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Scene(#[from] relief_scene::Error),
    #[error("expected a single-band raster, found {0}")]
    MultiBand(String),
    #[error("unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),
    #[error("raster carries no ModelPixelScale/ModelTiepoint tags")]
    MissingGeoreference,
    #[error("pixel buffer does not hold a {width}x{height} RGBA image")]
    PixelBuffer { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
