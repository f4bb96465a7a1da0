#![warn(
    clippy::unwrap_used,
    clippy::cast_lossless,
    clippy::unimplemented,
    clippy::expect_used
)]
//! File formats and command-line plumbing around `relief_scene`: GeoTIFF
//! decoding, JSON mesh and PNG output, option files and logging setup.
mod config;
mod error;
mod logging;
pub mod output;
pub mod raster;

pub use config::load_config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use output::{encode_png, write_mesh, write_png};
pub use raster::{decode_raster, open_raster, Raster};
