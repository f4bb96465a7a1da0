use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use bevy::log::info;
use image::{ImageFormat, RgbaImage};
use relief_scene::{Mesh, MeshDocument, RgbaBuffer};

use crate::error::{Error, Result};

/// Serializes `mesh` as a `{"vertices": [...], "faces": [...]}` document.
pub fn write_mesh(path: impl AsRef<Path>, mesh: &Mesh) -> Result<()> {
    let path = path.as_ref();
    info!("To JSON...");
    let document = MeshDocument::from(mesh);
    let mut writer = BufWriter::new(File::create(path)?);
    document.to_writer(&mut writer)?;
    writer.flush()?;
    info!(
        "Wrote {} vertices and {} faces to {}",
        document.vertices.len(),
        document.faces.len(),
        path.display()
    );
    return Ok(());
}

fn to_image(buffer: &RgbaBuffer) -> Result<RgbaImage> {
    let bad_buffer = || Error::PixelBuffer {
        width: buffer.width,
        height: buffer.height,
    };
    let width = u32::try_from(buffer.width).map_err(|_| bad_buffer())?;
    let height = u32::try_from(buffer.height).map_err(|_| bad_buffer())?;
    return RgbaImage::from_raw(width, height, buffer.pixels.clone()).ok_or_else(bad_buffer);
}

pub fn encode_png(buffer: &RgbaBuffer) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    to_image(buffer)?.write_to(&mut bytes, ImageFormat::Png)?;
    return Ok(bytes.into_inner());
}

pub fn write_png(path: impl AsRef<Path>, buffer: &RgbaBuffer) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode_png(buffer)?)?;
    info!(
        "Wrote {}x{} image to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    return Ok(());
}
