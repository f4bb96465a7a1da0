//! GeoTIFF elevation rasters decoded into a [`HeightGrid`].
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use bevy::log::{debug, info, warn};
use relief_scene::{HeightGrid, RasterMetadata, Sample};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tiff::ColorType;

use crate::error::{Error, Result};

/// A decoded elevation raster together with its georeferencing, when the file
/// carries both `ModelPixelScale` and `ModelTiepoint`.
#[derive(Debug, Clone)]
pub struct Raster {
    pub grid: HeightGrid,
    pub metadata: Option<RasterMetadata>,
    pub nodata: Option<f64>,
}

pub fn open_raster(path: impl AsRef<Path>) -> Result<Raster> {
    let path = path.as_ref();
    info!("Reading {}", path.display());
    let file = File::open(path)?;
    return decode_raster(BufReader::new(file));
}

pub fn decode_raster<R: Read + Seek>(reader: R) -> Result<Raster> {
    let mut decoder = Decoder::new(reader)?;
    let (width, height) = decoder.dimensions()?;
    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => return Err(Error::MultiBand(format!("{:?}", other))),
    }
    let metadata = read_metadata(&mut decoder)?;
    let nodata = read_nodata(&mut decoder)?;
    let values = to_f64(decoder.read_image()?)?;

    let samples: Vec<Sample> = values
        .into_iter()
        .map(|value| {
            if value.is_nan() || Some(value) == nodata {
                Sample::Missing
            } else {
                Sample::Elevation(value)
            }
        })
        .collect();
    let grid = HeightGrid::new(width as usize, height as usize, samples)?;
    debug!(
        "{}x{} raster, {} missing samples",
        width,
        height,
        grid.missing_count()
    );
    return Ok(Raster {
        grid,
        metadata,
        nodata,
    });
}

fn read_metadata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<RasterMetadata>> {
    let scale = decoder.find_tag(Tag::ModelPixelScaleTag)?;
    let tiepoint = decoder.find_tag(Tag::ModelTiepointTag)?;
    let (scale, tiepoint) = match (scale, tiepoint) {
        (Some(scale), Some(tiepoint)) => (scale.into_f64_vec()?, tiepoint.into_f64_vec()?),
        (None, None) => return Ok(None),
        _ => {
            warn!("Raster has only one of ModelPixelScale/ModelTiepoint, ignoring georeferencing");
            return Ok(None);
        }
    };
    if scale.len() < 2 || tiepoint.len() < 6 {
        warn!(
            "Malformed georeferencing tags ({} scale, {} tiepoint values)",
            scale.len(),
            tiepoint.len()
        );
        return Ok(None);
    }
    let pixel_scale = [scale[0], scale[1], scale.get(2).copied().unwrap_or(0.0)];
    let mut tie = [0.0; 6];
    tie.copy_from_slice(&tiepoint[..6]);
    return Ok(Some(RasterMetadata::new(pixel_scale, tie)));
}

fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<f64>> {
    let Some(value) = decoder.find_tag(Tag::GdalNodata)? else {
        return Ok(None);
    };
    let text = value.into_string()?;
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    match text.parse::<f64>() {
        Ok(nodata) => Ok(Some(nodata)),
        Err(_) => {
            warn!("Ignoring unparseable nodata value {:?}", text);
            Ok(None)
        }
    }
}

fn to_f64(result: DecodingResult) -> Result<Vec<f64>> {
    let values = match result {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(Error::UnsupportedSampleFormat(
                "unrecognised tiff sample type".to_string(),
            ))
        }
    };
    return Ok(values);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tiff::encoder::{colortype, TiffEncoder};

    fn float_tiff(width: u32, height: u32, data: &[f32], georeferenced: bool) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buf).unwrap();
            let mut image = encoder
                .new_image::<colortype::Gray32Float>(width, height)
                .unwrap();
            if georeferenced {
                image
                    .encoder()
                    .write_tag(Tag::ModelPixelScaleTag, &[0.5f64, 0.25, 0.0][..])
                    .unwrap();
                image
                    .encoder()
                    .write_tag(Tag::ModelTiepointTag, &[0.0f64, 0.0, 0.0, -123.0, 38.0, 0.0][..])
                    .unwrap();
                image.encoder().write_tag(Tag::GdalNodata, "-9999").unwrap();
            }
            image.write_data(data).unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn decodes_float_samples_and_georeferencing() {
        let bytes = float_tiff(3, 2, &[1.0, 2.0, 3.0, 4.0, -9999.0, 6.0], true);
        let raster = decode_raster(Cursor::new(bytes)).unwrap();

        assert_eq!(raster.grid.width(), 3);
        assert_eq!(raster.grid.height(), 2);
        assert_eq!(raster.grid.sample(2, 0), Sample::Elevation(3.0));
        assert_eq!(raster.grid.sample(0, 1), Sample::Elevation(4.0));
        assert_eq!(raster.grid.sample(1, 1), Sample::Missing);
        assert_eq!(raster.nodata, Some(-9999.0));

        let metadata = raster.metadata.unwrap();
        assert_eq!(metadata.pixel_scale, [0.5, 0.25, 0.0]);
        assert_eq!(metadata.tiepoint, [0.0, 0.0, 0.0, -123.0, 38.0, 0.0]);
    }

    #[test]
    fn plain_tiff_has_no_metadata() {
        let bytes = float_tiff(2, 2, &[0.0, 0.0, 0.0, 0.0], false);
        let raster = decode_raster(Cursor::new(bytes)).unwrap();
        assert!(raster.metadata.is_none());
        assert!(raster.nodata.is_none());
        // A real zero stays an elevation.
        assert_eq!(raster.grid.sample(0, 0), Sample::Elevation(0.0));
    }

    #[test]
    fn nan_samples_are_missing() {
        let bytes = float_tiff(2, 1, &[f32::NAN, 12.5], false);
        let raster = decode_raster(Cursor::new(bytes)).unwrap();
        assert!(raster.grid.sample(0, 0).is_missing());
        assert_eq!(raster.grid.sample(1, 0), Sample::Elevation(12.5));
    }

    #[test]
    fn integer_samples_convert_to_f64() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buf).unwrap();
            encoder
                .write_image::<colortype::Gray16>(2, 1, &[0u16, 4321])
                .unwrap();
        }
        let raster = decode_raster(Cursor::new(buf.into_inner())).unwrap();
        assert_eq!(raster.grid.sample(1, 0), Sample::Elevation(4321.0));
    }

    #[test]
    fn rejects_multi_band() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buf).unwrap();
            encoder
                .write_image::<colortype::RGB8>(1, 1, &[1u8, 2, 3])
                .unwrap();
        }
        let err = decode_raster(Cursor::new(buf.into_inner())).unwrap_err();
        assert!(matches!(err, Error::MultiBand(_)));
    }
}
